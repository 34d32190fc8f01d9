/// `paths` (spec §6): print the configured source search paths.
pub fn run(loader: &crate::loader::Loader) {
    for path in loader.describe() {
        println!("{path}");
    }
}
