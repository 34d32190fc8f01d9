use sig_analysis::{DiagnosticCollection, Environment};

/// `validate` (spec §6, §4.7). Returns whether any errors were found.
pub fn run(env: &Environment) -> bool {
    let diagnostics: DiagnosticCollection = sig_analysis::validate(env);
    for d in diagnostics.errors() {
        println!(
            "{}:{}: [{}] {}",
            d.location.start.line, d.location.start.column, d.code, d.message
        );
    }
    if diagnostics.has_errors() {
        println!("{} error(s) found", diagnostics.error_count());
    } else {
        println!("no errors found");
    }
    diagnostics.has_errors()
}
