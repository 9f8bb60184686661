use chrono::Local;

fn main() {
    // Build date shown in the attribution label and startup log
    let build_date = Local::now().format("%Y-%m-%d").to_string();
    println!("cargo:rustc-env=BUILD_DATE={build_date}");

    println!("cargo:rerun-if-changed=build.rs");
}
