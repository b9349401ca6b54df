#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    // L'icona viene incorporata solo se presente in res/
    if !std::path::Path::new("res/keymark.ico").exists() {
        return;
    }

    let mut res = WindowsResource::new();
    res.set_icon("res/keymark.ico")
        .set("FileDescription", "keymark CLI")
        .set("ProductName", "keymark")
        .set("OriginalFilename", "keymark.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"))
        .compile()
        .expect("Failed to embed icon resource");
}

#[cfg(not(target_os = "windows"))]
fn main() {}
