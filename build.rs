use vergen::Emitter;
use vergen_git2::Git2Builder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // crates.io tarballs have no .git directory
    match Git2Builder::default().describe(true, true, None).build() {
        Ok(git2) => {
            Emitter::default().add_instructions(&git2)?.emit()?;
        }
        Err(_) => {
            println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE=unknown");
        }
    }
    Ok(())
}
