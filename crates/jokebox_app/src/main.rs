mod platform;

fn main() {
    if let Err(err) = platform::run_app() {
        eprintln!("jokebox: {err:#}");
        std::process::exit(1);
    }
}
