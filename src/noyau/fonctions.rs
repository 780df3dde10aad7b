// src/noyau/fonctions.rs
//
// Table des fonctions intégrées : nom -> (arité, implémentation).
// Construite une seule fois, puis lue seulement.
//
// Frontière d’exactitude : chaque fonction passe par le décimal (decimal.rs)
// et revient en rationnel. Tout le reste du noyau est exact.
//
// - sqrt(x)     : floor(√x · 10^P) / 10^P, P = PRECISION
// - floor(x)    : plus grand entier <= x (exact)
// - scale(n, x) : floor(x · 10^n) / 10^n, n entier

use std::collections::HashMap;
use std::sync::OnceLock;

use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};
use tracing::debug;

use super::decimal::{Decimal, PRECISION};
use super::erreur::{Error, Result};
use super::rationnel::{est_entier, pow10};

pub type Implementation = fn(&[BigRational]) -> Result<BigRational>;

#[derive(Clone, Copy)]
pub struct Fonction {
    pub arite: usize,
    pub implementation: Implementation,
}

/// Registre immuable des fonctions connues.
#[derive(Clone, Default)]
pub struct Fonctions {
    table: HashMap<&'static str, Fonction>,
}

impl Fonctions {
    pub fn vide() -> Self {
        Self::default()
    }

    /// sqrt, floor, scale.
    pub fn standard() -> Self {
        let mut f = Self::vide();
        f.ajouter("sqrt", 1, sqrt);
        f.ajouter("floor", 1, floor);
        f.ajouter("scale", 2, scale);
        f
    }

    pub fn ajouter(&mut self, nom: &'static str, arite: usize, implementation: Implementation) {
        self.table.insert(
            nom,
            Fonction {
                arite,
                implementation,
            },
        );
    }

    pub fn get(&self, nom: &str) -> Option<&Fonction> {
        self.table.get(nom)
    }

    /// Vérifie le nom et l’arité avant toute évaluation des arguments.
    pub fn resoudre(&self, nom: &str, obtenu: usize) -> Result<&Fonction> {
        let f = self
            .get(nom)
            .ok_or_else(|| Error::UnknownFunction(nom.to_string()))?;
        if f.arite != obtenu {
            return Err(Error::arite(nom, f.arite, obtenu));
        }
        Ok(f)
    }
}

static STANDARD: OnceLock<Fonctions> = OnceLock::new();

/// Table standard partagée (construite au premier usage).
pub fn fonctions_standard() -> &'static Fonctions {
    STANDARD.get_or_init(Fonctions::standard)
}

/* ------------------------ Implémentations ------------------------ */

// Chaque implémentation revérifie son arité : `get` donne accès direct à la table.

fn sqrt(args: &[BigRational]) -> Result<BigRational> {
    let [x] = args else {
        return Err(Error::arite("sqrt", 1, args.len()));
    };
    let d = Decimal::racine(x, PRECISION)
        .ok_or_else(|| Error::domaine("sqrt", "argument négatif"))?;
    debug!(x = %x, decimal = %d, "sqrt");
    Ok(d.vers_rationnel())
}

fn floor(args: &[BigRational]) -> Result<BigRational> {
    let [x] = args else {
        return Err(Error::arite("floor", 1, args.len()));
    };
    let d = Decimal::depuis_rationnel(x, 0);
    debug!(x = %x, decimal = %d, "floor");
    Ok(d.vers_rationnel())
}

/// Plus grand nombre d’échelle accepté par scale (10^n doit rester raisonnable).
const ECHELLE_MAX: u64 = 100_000;

fn scale(args: &[BigRational]) -> Result<BigRational> {
    let [n, x] = args else {
        return Err(Error::arite("scale", 2, args.len()));
    };

    if !est_entier(n) {
        return Err(Error::domaine("scale", "nombre de chiffres non entier"));
    }
    let k = n
        .numer()
        .abs()
        .to_u64()
        .filter(|k| *k <= ECHELLE_MAX)
        .ok_or_else(|| Error::domaine("scale", "nombre de chiffres trop grand"))?
        as usize;

    let d = if n.is_negative() {
        // floor(x / 10^k) · 10^k
        let p = BigRational::from_integer(pow10(k));
        let d = Decimal::depuis_rationnel(&(x / &p), 0);
        debug!(x = %x, decimal = %d, echelle = %n, "scale");
        d.vers_rationnel() * p
    } else {
        let d = Decimal::depuis_rationnel(x, k);
        debug!(x = %x, decimal = %d, "scale");
        d.vers_rationnel()
    };
    Ok(d)
}
