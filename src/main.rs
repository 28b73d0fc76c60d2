use app::{CliManager, Command, TranslateCommand};

mod app;

const AUTHORS: &str = "Jean-Marie Lagniez <lagniez@cril.fr> and Emmanuel Lonca <lonca@cril.fr>";

fn main() {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let mut app = CliManager::new(
        app_name,
        app_version,
        AUTHORS,
        "Zinco, a FlatZinc-to-theory-directive translator.",
    );
    let commands: Vec<Box<dyn Command>> = vec![Box::new(TranslateCommand::new())];
    for c in commands {
        app.add_command(c);
    }
    app.launch();
}
