//! # Elementary operators (`ops`)
//!
//! Every operator is a free `xxx_op` function generic over a
//! [`Recorder`](crate::autograd::Recorder): it reads its operands' values,
//! computes the output value together with the local derivative with respect
//! to each operand, and records one node. The backward pass only ever
//! multiplies a node's gradient by these stored derivatives.
//!
//! - [`arithmetic`]: sums, products, powers, quotients.
//! - [`math_elem`]: `log`, `exp`.
//! - [`activation`]: pointwise activations and the [`Activation`](activation::Activation) selector.

pub mod activation;
pub mod arithmetic;
pub mod math_elem;
