fn main() {
    for (source, exported) in [
        ("TARGET", "INDEXCFG_BUILD_TARGET"),
        ("PROFILE", "INDEXCFG_BUILD_PROFILE"),
    ] {
        if let Ok(value) = std::env::var(source) {
            println!("cargo:rustc-env={exported}={value}");
        }
        println!("cargo:rerun-if-env-changed={source}");
    }
}
