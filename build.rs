use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = command_stdout("git", &["rev-parse", "--short", "HEAD"])
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=MONTHLY_BALANCE_BUILD_HASH={hash}");

    let status = match command_stdout("git", &["status", "--porcelain"]) {
        Some(out) if out.is_empty() => "clean",
        Some(_) => "dirty",
        None => "unknown",
    };
    println!("cargo:rustc-env=MONTHLY_BALANCE_BUILD_STATUS={status}");

    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    println!("cargo:rustc-env=MONTHLY_BALANCE_BUILD_TIMESTAMP={timestamp}");

    for (var, fallback, key) in [
        ("TARGET", "unknown-target", "TARGET"),
        ("PROFILE", "unknown-profile", "PROFILE"),
    ] {
        let value = env::var(var).unwrap_or_else(|_| fallback.to_string());
        println!("cargo:rustc-env=MONTHLY_BALANCE_BUILD_{key}={value}");
    }

    let rustc = command_stdout("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=MONTHLY_BALANCE_BUILD_RUSTC={rustc}");
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
