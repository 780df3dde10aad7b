// src/noyau/format.rs
//
// Rendu texte :
// - rationnel -> entier exact si dénominateur 1, sinon lecture décimale tronquée
// - rationnel -> fraction exacte n/d (option --fraction)
// - arbre -> texte parenthésé (journaux debug)

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::decimal::scaled_to_decimal;
use super::expr::{Expr, UnaryOp};
use super::rationnel::pow10;

/// Chiffres significatifs affichés pour un résultat non entier.
pub const CHIFFRES_AFFICHAGE: usize = 100;

/* ------------------------ Rationnels ------------------------ */

/// Rendu standard d’un résultat.
/// Entier : texte exact du numérateur, sans aucune conversion décimale.
/// Sinon : n/d en décimal, tronqué à CHIFFRES_AFFICHAGE chiffres significatifs
/// (approximation assumée), zéros de queue retirés.
pub fn format_rational(r: &BigRational) -> String {
    if r.denom().is_one() {
        return r.numer().to_string();
    }
    format_decimal(r, CHIFFRES_AFFICHAGE)
}

/// Rendu exact : "n" ou "n/d".
pub fn format_fraction(r: &BigRational) -> String {
    let n = r.numer();
    let d = r.denom();
    if d.is_one() {
        format!("{n}")
    } else {
        format!("{n}/{d}")
    }
}

/// |r| tronqué à `significatifs` chiffres significatifs, signe conservé.
fn format_decimal(r: &BigRational, significatifs: usize) -> String {
    let n = r.numer().abs();
    let d = r.denom();

    let digits = chiffres_fractionnaires(&n, d, significatifs);
    let scaled = (&n * pow10(digits)).div_floor(d);

    let mut txt = scaled_to_decimal(scaled, digits);
    if txt.contains('.') {
        let garde = txt.trim_end_matches('0').trim_end_matches('.').len();
        txt.truncate(garde);
    }

    if r.is_negative() {
        format!("-{txt}")
    } else {
        txt
    }
}

/// Nombre de chiffres après la virgule pour obtenir `significatifs` chiffres
/// significatifs sur n/d (n >= 0, d > 0).
/// Un non-entier garde toujours au moins son premier chiffre fractionnaire non nul,
/// même si la partie entière dépasse déjà `significatifs` chiffres.
fn chiffres_fractionnaires(n: &BigInt, d: &BigInt, significatifs: usize) -> usize {
    let (ent, reste) = n.div_rem(d);
    if reste.is_zero() {
        return 0;
    }

    // zéros de tête après la virgule : plus petit z tel que reste*10^(z+1) >= d
    let mut z = 0usize;
    let mut t = &reste * BigInt::from(10);
    while &t < d {
        t *= 10u32;
        z += 1;
    }

    if ent.is_zero() {
        return z + significatifs;
    }
    let k = ent.to_string().len();
    significatifs.saturating_sub(k).max(z + 1)
}

/* ------------------------ Arbre ------------------------ */

/// Texte parenthésé de l’arbre (une paire de parenthèses par opération binaire).
/// Le texte se relit en un arbre de même valeur.
pub fn format_expr_pretty(e: &Expr) -> String {
    match e {
        // fraction ou négatif : parenthèses, sinon "3/(1/2)" se relirait "(3/1)/2"
        Expr::Rat(r) if r.denom().is_one() && !r.is_negative() => format_fraction(r),
        Expr::Rat(r) => format!("({})", format_fraction(r)),

        Expr::Unary(op, x) => {
            let signe = match op {
                UnaryOp::Identity => '+',
                UnaryOp::Negate => '-',
            };
            match x.as_ref() {
                // un seul signe en tête : "-(-2)", jamais "--2"
                Expr::Unary(..) => format!("{signe}({})", format_expr_pretty(x)),
                _ => format!("{signe}{}", format_expr_pretty(x)),
            }
        }

        Expr::Binary(op, a, b) => format!(
            "({}{}{})",
            format_expr_pretty(a),
            op.symbole(),
            format_expr_pretty(b)
        ),

        Expr::Call { name, args } => {
            let args: Vec<String> = args.iter().map(format_expr_pretty).collect();
            format!("{name}({})", args.join(", "))
        }
    }
}
