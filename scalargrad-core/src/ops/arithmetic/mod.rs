//! Arithmetic on scalar nodes: sums, products, powers and quotients.

pub mod add;
pub mod div;
pub mod mul;
pub mod neg;
pub mod pow;
pub mod sub;

pub use add::{add_const_op, add_op, sum_op};
pub use div::{div_const_op, div_op};
pub use mul::{mul_const_op, mul_op};
pub use neg::neg_op;
pub use pow::pow_op;
pub use sub::sub_op;
