use crate::evaluator::{EvalError, Evaluator};
use num_bigint::BigInt;
use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

const LEAF_TAG: u8 = 0;
const OPERATION_TAG: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "**",
        }
    }

    fn tag(self) -> u8 {
        match self {
            Operator::Add => 0,
            Operator::Sub => 1,
            Operator::Mul => 2,
            Operator::Div => 3,
            Operator::Pow => 4,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Integer(BigInt),
    Operation {
        op: Operator,
        first: Number,
        second: Number,
    },
}

/// SHA-256 digest of a node's structure.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.to_hex())
    }
}

/// An exact number kept as an unevaluated expression tree.
///
/// Cloning is cheap and shares the tree. Nothing is rounded until
/// [`Number::evaluate`] (or an [`Evaluator`]) is asked for a number of places.
#[derive(Clone)]
pub struct Number {
    inner: Arc<Inner>,
}

struct Inner {
    node: Node,
    fingerprint: OnceLock<Fingerprint>,
}

impl Number {
    pub fn integer(value: impl Into<BigInt>) -> Self {
        Self::from_node(Node::Integer(value.into()))
    }

    /// New operation node with `first` and `second` as operands, in that order.
    pub fn operation(op: Operator, first: &Number, second: &Number) -> Self {
        Self::from_node(Node::Operation {
            op,
            first: first.clone(),
            second: second.clone(),
        })
    }

    pub fn add(&self, other: &Number) -> Number {
        Self::operation(Operator::Add, self, other)
    }

    pub fn sub(&self, other: &Number) -> Number {
        Self::operation(Operator::Sub, self, other)
    }

    pub fn mul(&self, other: &Number) -> Number {
        Self::operation(Operator::Mul, self, other)
    }

    pub fn div(&self, other: &Number) -> Number {
        Self::operation(Operator::Div, self, other)
    }

    pub fn pow(&self, other: &Number) -> Number {
        Self::operation(Operator::Pow, self, other)
    }

    /// `0 - self`, the same shape a `-` literal produces.
    pub fn neg(&self) -> Number {
        Number::integer(0).sub(self)
    }

    pub fn node(&self) -> &Node {
        &self.inner.node
    }

    pub fn as_integer(&self) -> Option<&BigInt> {
        match self.node() {
            Node::Integer(value) => Some(value),
            Node::Operation { .. } => None,
        }
    }

    pub fn operator(&self) -> Option<Operator> {
        match self.node() {
            Node::Integer(_) => None,
            Node::Operation { op, .. } => Some(*op),
        }
    }

    pub fn operands(&self) -> Option<(&Number, &Number)> {
        match self.node() {
            Node::Integer(_) => None,
            Node::Operation { first, second, .. } => Some((first, second)),
        }
    }

    /// Longest path from this node down to a leaf; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        match self.node() {
            Node::Integer(_) => 0,
            Node::Operation { first, second, .. } => 1 + first.depth().max(second.depth()),
        }
    }

    /// Number of leaves, counting shared subtrees once per reference.
    pub fn leaf_count(&self) -> usize {
        match self.node() {
            Node::Integer(_) => 1,
            Node::Operation { first, second, .. } => first.leaf_count() + second.leaf_count(),
        }
    }

    /// Structural digest; equal trees share it regardless of how they were built.
    pub fn fingerprint(&self) -> Fingerprint {
        *self
            .inner
            .fingerprint
            .get_or_init(|| compute_fingerprint(&self.inner.node))
    }

    pub fn ptr_eq(&self, other: &Number) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Value rounded half-up to `places` digits after the point.
    pub fn evaluate(&self, places: u32) -> Result<String, EvalError> {
        Evaluator::default().evaluate(self, places)
    }

    fn from_node(node: Node) -> Self {
        Self {
            inner: Arc::new(Inner {
                node,
                fingerprint: OnceLock::new(),
            }),
        }
    }
}

fn compute_fingerprint(node: &Node) -> Fingerprint {
    let mut hasher = Sha256::new();
    match node {
        Node::Integer(value) => {
            hasher.update([LEAF_TAG]);
            hasher.update(value.to_signed_bytes_be());
        }
        Node::Operation { op, first, second } => {
            hasher.update([OPERATION_TAG, op.tag()]);
            hasher.update(first.fingerprint().as_bytes());
            hasher.update(second.fingerprint().as_bytes());
        }
    }
    Fingerprint(hasher.finalize().into())
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.fingerprint() == other.fingerprint()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint().hash(state);
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Integer(value) => write!(f, "{value}"),
            Node::Operation { op, first, second } => write!(f, "({first:?} {op} {second:?})"),
        }
    }
}

macro_rules! number_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::integer(value)
                }
            }
        )*
    };
}

number_from_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt);

#[cfg(test)]
#[path = "node_test.rs"]
mod tests;
