// src/app.rs
//
// Calculatrice Q — pilote (lecture -> noyau -> sortie)
// ----------------------------------------------------
// Rôle:
// - Tirer les unités d’entrée une par une dans UN seul lexeur
// - Écrire une valeur formatée par unité
// - S’arrêter à la première erreur (pas de reprise)
//
// Aucune évaluation ici : tout passe par crate::noyau.

use std::io::{Read, Write};

use anyhow::Context;
use tracing::info;

use crate::noyau::jetons::TokKind;
use crate::noyau::{evaluate_with, format_fraction, format_rational, Fonctions, Lexer};

/// Forme d’affichage des résultats non entiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Affichage {
    /// Lecture décimale tronquée (CHIFFRES_AFFICHAGE chiffres significatifs).
    #[default]
    Decimal,
    /// Fraction exacte n/d.
    Fraction,
}

/// Évalue toutes les expressions du flux, une ligne de sortie par expression.
/// Retourne le nombre d’expressions évaluées.
pub fn executer<R: Read, W: Write>(
    lex: &mut Lexer<R>,
    fonctions: &Fonctions,
    affichage: Affichage,
    sortie: &mut W,
) -> anyhow::Result<usize> {
    let mut n = 0usize;

    while !lex.is(TokKind::Eof)? {
        let v = evaluate_with(lex, fonctions)?;
        let source = lex.take_history();

        let texte = match affichage {
            Affichage::Decimal => format_rational(&v),
            Affichage::Fraction => format_fraction(&v),
        };
        info!(source = %source, resultat = %texte, "unité évaluée");

        writeln!(sortie, "{texte}").context("écriture du résultat")?;
        n += 1;
    }

    Ok(n)
}
