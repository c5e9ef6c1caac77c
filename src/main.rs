fn main() {
    if let Err(err) = curbside::cli::run() {
        curbside::ui::output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
