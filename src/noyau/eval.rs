//! Noyau — évaluation (pipeline réel)
//!
//! flux -> jetons (lexeur) -> Expr (parseur) -> BigRational (parcours post-ordre)
//!
//! Une évaluation réussit avec un seul rationnel ou échoue avec une seule erreur.
//! Rien n’est partagé entre deux évaluations, sauf la table des fonctions (lecture seule).

use std::io::Read;

use num_rational::BigRational;
use tracing::debug;

use super::erreur::Result;
use super::expr::{BinOp, Expr, UnaryOp};
use super::fonctions::{fonctions_standard, Fonctions};
use super::lexeur::Lexer;
use super::parseur::Parser;
use super::rationnel::diviser;

pub struct Evaluator<'f> {
    fonctions: &'f Fonctions,
}

impl<'f> Evaluator<'f> {
    pub fn new(fonctions: &'f Fonctions) -> Self {
        Self { fonctions }
    }

    pub fn eval(&self, e: &Expr) -> Result<BigRational> {
        match e {
            Expr::Rat(r) => Ok(r.clone()),

            Expr::Unary(op, x) => {
                let v = self.eval(x)?;
                Ok(match op {
                    UnaryOp::Identity => v,
                    UnaryOp::Negate => -v,
                })
            }

            Expr::Binary(op, a, b) => {
                let a = self.eval(a)?;
                let b = self.eval(b)?;
                match op {
                    BinOp::Add => Ok(a + b),
                    BinOp::Sub => Ok(a - b),
                    BinOp::Mul => Ok(a * b),
                    BinOp::Div => diviser(&a, &b),
                }
            }

            Expr::Call { name, args } => {
                // nom + arité d’abord : un appel mal formé échoue sans évaluer ses arguments
                let f = self.fonctions.resoudre(name, args.len())?;
                let valeurs = args
                    .iter()
                    .map(|a| self.eval(a))
                    .collect::<Result<Vec<_>>>()?;
                (f.implementation)(&valeurs)
            }
        }
    }
}

/// Lit UNE expression dans le lexeur et l’évalue.
/// Le lexeur reste positionné juste après l’expression (la suite n’est pas lue).
pub fn evaluate_with<R: Read>(lex: &mut Lexer<R>, fonctions: &Fonctions) -> Result<BigRational> {
    let expr = Parser::new(lex).parse()?;
    debug!(arbre = %expr, "expression lue");
    let v = Evaluator::new(fonctions).eval(&expr)?;
    debug!(valeur = %v, "expression évaluée");
    Ok(v)
}

/// Comme `evaluate_with`, avec la table standard (sqrt, floor, scale).
pub fn evaluate<R: Read>(lex: &mut Lexer<R>) -> Result<BigRational> {
    evaluate_with(lex, fonctions_standard())
}

/// API publique minimale : évalue la première expression d’un texte.
pub fn eval_expression(s: &str) -> Result<BigRational> {
    let mut lex = Lexer::new(s.as_bytes());
    evaluate(&mut lex)
}
