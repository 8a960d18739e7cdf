pub mod decls;
pub mod exp;
pub mod ident;
pub mod stmts;
pub mod sym;
mod traits;

pub use decls::*;
pub use exp::*;
pub use ident::*;
pub use stmts::*;
pub use sym::*;
pub use traits::*;

pub type HashMap<K, V> = fxhash::FxHashMap<K, V>;
