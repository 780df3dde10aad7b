//! Noyau exact Q
//!
//! Organisation interne :
//! - rationnel.rs : arithmétique exacte + littéraux décimaux
//! - decimal.rs   : décimal scalé (sqrt / floor / scale) <-> rationnel
//! - jetons.rs    : jetons
//! - lexeur.rs    : lexeur paresseux (1 jeton d’avance)
//! - expr.rs      : arbre d’expression
//! - parseur.rs   : descente récursive
//! - fonctions.rs : table des fonctions intégrées
//! - eval.rs      : pipeline complet
//! - format.rs    : rendu texte
//! - erreur.rs    : erreurs

pub mod decimal;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod lexeur;
pub mod parseur;
pub mod rationnel;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{Error, ParseError, Result};
pub use eval::{eval_expression, evaluate, evaluate_with, Evaluator};
pub use fonctions::{fonctions_standard, Fonctions};
pub use format::{format_fraction, format_rational};
pub use lexeur::Lexer;
