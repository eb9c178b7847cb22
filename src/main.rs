use git_contrib::cli::Cli;

fn main() {
    let cli = Cli::parse();

    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = cli.log_level() {
        builder.filter_level(level);
    }
    builder.target(env_logger::Target::Stderr).init();

    if let Err(e) = cli.execute() {
        println!("{e:#}");
        std::process::exit(1);
    }
}
