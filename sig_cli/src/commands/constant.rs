use sig_analysis::{lookup_constant, Context, Environment};
use sig_syntax::TypeName;

/// `constant [--context=NS] Name` (spec §6, §4.6).
pub fn run(env: &Environment, name: &TypeName, context: &Context) {
    match lookup_constant(env, name, context) {
        Some(ty) => println!("{name}: {}", crate::render::render_type(&ty)),
        None => println!("{name}: not found"),
    }
}
