macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

pub mod elimination_order;
pub mod error;
pub mod exact;
pub mod graph;
pub mod io;
pub mod lowerbound;
pub mod solver;
pub mod timeout;
pub mod tree_decomposition;
pub mod upperbound;

#[cfg(feature = "pace-logging")]
pub mod logging;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use elimination_order::{build_decomposition, get_width, EliminationOrder};
pub use error::Error;
pub use solver::{solve, Solution, Solver};
