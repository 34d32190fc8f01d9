pub mod function_type;
pub mod method_type;
pub mod type_parser;

pub use function_type::{function_type, param_list};
pub use method_type::{method_type, overload, overload_list};
pub use type_parser::type_expr;
