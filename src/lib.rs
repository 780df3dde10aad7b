//! Calculatrice Q — évaluateur d’expressions sur les rationnels exacts.
//!
//! ```
//! use calculatrice_q::noyau::{eval_expression, format_rational};
//!
//! let v = eval_expression("(2+3)*4 - 1/4").unwrap();
//! assert_eq!(format_rational(&v), "19.75");
//! ```

pub mod app;
pub mod noyau;
