// src/noyau/rationnel.rs
//
// Arithmétique rationnelle exacte.
// BigRational garde déjà l’invariant (forme réduite, dénominateur > 0) après
// chaque construction et chaque opération : on ne fait qu’ajouter ce qui manque
// (division vérifiée, construction des littéraux chiffre par chiffre).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{CheckedDiv, One, Zero};

use super::erreur::{Error, Result};

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

pub fn est_entier(r: &BigRational) -> bool {
    r.denom().is_one()
}

/// a / b, ou DivisionByZero si le numérateur de b est nul.
pub fn diviser(a: &BigRational, b: &BigRational) -> Result<BigRational> {
    if b.numer().is_zero() {
        return Err(Error::DivisionByZero);
    }
    a.checked_div(b).ok_or(Error::DivisionByZero)
}

/// Construction d’un littéral décimal sans passer par les flottants.
/// "12.34" = 12 + 3/10 + 4/100
#[derive(Debug, Clone)]
pub struct Litteral {
    valeur: BigRational,
    // poids du prochain chiffre fractionnaire (1/10, 1/100, ...)
    poids: Option<BigRational>,
}

impl Litteral {
    pub fn new() -> Self {
        Self {
            valeur: BigRational::zero(),
            poids: None,
        }
    }

    /// Chiffre de la partie entière : n = n*10 + c
    pub fn chiffre_entier(&mut self, c: u8) {
        let d = BigRational::from_integer(BigInt::from(c));
        self.valeur = &self.valeur * BigRational::from_integer(BigInt::from(10)) + d;
    }

    /// Passe à la partie fractionnaire (après le '.').
    pub fn virgule(&mut self) {
        if self.poids.is_none() {
            self.poids = Some(BigRational::one());
        }
    }

    /// Chiffre de la partie fractionnaire : poids /= 10 ; n += poids*c
    pub fn chiffre_fraction(&mut self, c: u8) {
        let poids = self.poids.get_or_insert_with(BigRational::one);
        *poids = &*poids / BigRational::from_integer(BigInt::from(10));
        let d = BigRational::from_integer(BigInt::from(c));
        self.valeur = &self.valeur + &*poids * d;
    }

    pub fn valeur(self) -> BigRational {
        self.valeur
    }
}

impl Default for Litteral {
    fn default() -> Self {
        Self::new()
    }
}
