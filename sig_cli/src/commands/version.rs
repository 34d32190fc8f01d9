/// `version` (spec §6).
pub fn run() {
    println!("sigil {}", env!("CARGO_PKG_VERSION"));
}
