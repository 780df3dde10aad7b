// src/noyau/decimal.rs
//
// Décimal à précision arbitraire = entier “scalé” (mantisse × 10^-echelle).
// Sert uniquement de passage obligé pour les fonctions qui ne peuvent pas
// rester exactes (sqrt) ou qui tronquent (floor, scale).
// Politique unique : troncature vers -∞ (floor), jamais d’arrondi au plus proche.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::rationnel::pow10;

/// Chiffres décimaux conservés par sqrt et par les conversions Décimal -> Rationnel.
pub const PRECISION: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    mantisse: BigInt,
    echelle: usize,
}

impl Decimal {
    pub fn mantisse(&self) -> &BigInt {
        &self.mantisse
    }

    pub fn echelle(&self) -> usize {
        self.echelle
    }

    /// r -> floor(r * 10^echelle) × 10^-echelle
    pub fn depuis_rationnel(r: &BigRational, echelle: usize) -> Self {
        let scale = pow10(echelle);
        let mantisse = (r.numer() * scale).div_floor(r.denom());
        Self { mantisse, echelle }
    }

    /// Conversion exacte du décimal : mantisse / 10^echelle, réduit.
    pub fn vers_rationnel(&self) -> BigRational {
        BigRational::new(self.mantisse.clone(), pow10(self.echelle))
    }

    /// floor(sqrt(r) * 10^echelle) × 10^-echelle, calculé d’un seul tenant sur r = n/d
    /// (pas de racines séparées du numérateur et du dénominateur).
    /// None si r < 0.
    pub fn racine(r: &BigRational, echelle: usize) -> Option<Self> {
        if r.is_negative() {
            return None;
        }
        let n = r.numer();
        let d = r.denom();

        // y = floor(sqrt(n * 10^(2*echelle) / d))
        let cible = (n * pow10(2 * echelle)).div_floor(d);
        Some(Self {
            mantisse: racine_entiere(&cible),
            echelle,
        })
    }
}

/// floor(sqrt(x)) pour x >= 0 (Newton sur les entiers).
fn racine_entiere(x: &BigInt) -> BigInt {
    if x.is_zero() {
        return BigInt::zero();
    }

    // point de départ >= sqrt(x) : 2^(ceil(bits/2))
    let bits = x.bits();
    let mut y = BigInt::one() << ((bits + 1) / 2) as usize;

    loop {
        let y_next = (&y + x / &y) >> 1usize;
        if y_next >= y {
            break;
        }
        y = y_next;
    }

    // ajustement final (floor)
    while &y * &y > *x {
        y -= 1u32;
    }
    while (&y + 1u32) * (&y + 1u32) <= *x {
        y += 1u32;
    }
    y
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// Texte décimal tronqué (mantisse × 10^-digits), zéros de queue conservés.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&scaled_to_decimal(self.mantisse.clone(), self.echelle))
    }
}
