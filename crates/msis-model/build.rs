use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=MSIS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MSIS_LIB_NAME");

    // Only the native backend needs the Fortran library
    if env::var_os("CARGO_FEATURE_NATIVE").is_none() {
        return;
    }

    if let Some(dir) = env::var_os("MSIS_LIB_DIR") {
        println!(
            "cargo:rustc-link-search=native={}",
            PathBuf::from(dir).display()
        );
    }

    let lib_name = env::var("MSIS_LIB_NAME").unwrap_or_else(|_| "msis2".to_string());
    println!("cargo:rustc-link-lib={}", lib_name);
}
