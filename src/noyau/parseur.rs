// src/noyau/parseur.rs
//
// Descente récursive, un niveau de fonction par niveau de priorité :
//
//   expr           := additive
//   additive       := multiplicative (('+'|'-') multiplicative)*
//   multiplicative := unary (('*'|'/') unary)*
//   unary          := ('+'|'-')? primary
//   primary        := NUMBER | '(' expr ')' | IDENT '(' (expr (',' expr)*)? ')'
//
// Les niveaux binaires replient de gauche à droite (associativité à gauche).
// Un seul signe en tête : "--2" est refusé.
// Imbrication et hauteur de l’arbre sont bornées : au-delà, erreur de syntaxe typée.
// Les Newline sont transparents partout où l’on examine le prochain jeton.

use std::io::Read;

use super::erreur::{ParseError, Result};
use super::expr::{BinOp, Expr, UnaryOp};
use super::jetons::{Tok, TokKind};
use super::lexeur::Lexer;

/// Imbrication maximale : parenthèses et arguments d’appel.
pub const MAX_IMBRICATION: usize = 256;

/// Hauteur maximale de l’arbre lu (évaluation, rendu et libération le parcourent récursivement).
pub const MAX_HAUTEUR: usize = 1_000;

/// Sous-arbre lu, avec sa hauteur (nœuds sur le plus long chemin jusqu’à une feuille).
struct Lu {
    expr: Expr,
    hauteur: usize,
}

fn feuille(expr: Expr) -> Lu {
    Lu { expr, hauteur: 1 }
}

fn noeud(expr: Expr, hauteur: usize) -> Result<Lu> {
    if hauteur > MAX_HAUTEUR {
        return Err(ParseError::TreeTooDeep {
            limite: MAX_HAUTEUR,
        }
        .into());
    }
    Ok(Lu { expr, hauteur })
}

pub struct Parser<'a, R> {
    lex: &'a mut Lexer<R>,
    imbrication: usize,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(lex: &'a mut Lexer<R>) -> Self {
        Self {
            lex,
            imbrication: 0,
        }
    }

    /// Lit une expression complète et s’arrête là : ce qui suit reste dans le lexeur.
    pub fn parse(&mut self) -> Result<Expr> {
        self.parse_expr().map(|lu| lu.expr)
    }

    /// Consomme le prochain jeton significatif, qui doit être de nature `kind`.
    fn expect(&mut self, kind: TokKind) -> Result<Tok> {
        let tok = self.lex.next_significant()?;
        if tok.is(kind) {
            Ok(tok)
        } else {
            Err(ParseError::ExpectedToken {
                attendu: kind,
                obtenu: tok.kind(),
            }
            .into())
        }
    }

    fn parse_expr(&mut self) -> Result<Lu> {
        self.imbrication += 1;
        let lu = if self.imbrication > MAX_IMBRICATION {
            Err(ParseError::TooDeeplyNested {
                limite: MAX_IMBRICATION,
            }
            .into())
        } else {
            self.parse_additive()
        };
        self.imbrication -= 1;
        lu
    }

    fn parse_additive(&mut self) -> Result<Lu> {
        let mut lhs = self.parse_multiplicative()?;

        loop {
            let op = match self.lex.peek_significant()? {
                Tok::Plus => BinOp::Add,
                Tok::Minus => BinOp::Sub,
                _ => break,
            };
            self.lex.next_significant()?;
            let rhs = self.parse_multiplicative()?;
            let h = 1 + lhs.hauteur.max(rhs.hauteur);
            lhs = noeud(Expr::binary(op, lhs.expr, rhs.expr), h)?;
        }

        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> Result<Lu> {
        let mut lhs = self.parse_unary()?;

        loop {
            let op = match self.lex.peek_significant()? {
                Tok::Star => BinOp::Mul,
                Tok::Slash => BinOp::Div,
                _ => break,
            };
            self.lex.next_significant()?;
            let rhs = self.parse_unary()?;
            let h = 1 + lhs.hauteur.max(rhs.hauteur);
            lhs = noeud(Expr::binary(op, lhs.expr, rhs.expr), h)?;
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Lu> {
        let op = match self.lex.peek_significant()? {
            Tok::Plus => Some(UnaryOp::Identity),
            Tok::Minus => Some(UnaryOp::Negate),
            _ => None,
        };

        match op {
            Some(op) => {
                self.lex.next_significant()?;
                let x = self.parse_primary()?;
                noeud(Expr::unary(op, x.expr), 1 + x.hauteur)
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Lu> {
        match self.lex.next_significant()? {
            Tok::Num(r) => Ok(feuille(Expr::Rat(r))),

            Tok::LPar => {
                let e = self.parse_expr()?;
                self.expect(TokKind::RPar)?;
                Ok(e)
            }

            Tok::Ident(name) => {
                self.expect(TokKind::LPar)?;
                let (args, h) = self.parse_args()?;
                noeud(Expr::call(name, args), 1 + h)
            }

            tok => Err(ParseError::ExpectedPrimary(tok.kind()).into()),
        }
    }

    /// Arguments après '(' : vide, ou expr (',' expr)*, puis ')'.
    /// Renvoie aussi la plus grande hauteur parmi les arguments.
    fn parse_args(&mut self) -> Result<(Vec<Expr>, usize)> {
        let mut args = Vec::new();
        let mut hauteur = 0;

        if !self.lex.is(TokKind::RPar)? {
            loop {
                let a = self.parse_expr()?;
                hauteur = hauteur.max(a.hauteur);
                args.push(a.expr);
                if !self.lex.is(TokKind::Comma)? {
                    break;
                }
                self.lex.next_significant()?;
            }
        }

        self.expect(TokKind::RPar)?;
        Ok((args, hauteur))
    }
}
