use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    prodimg completions bash > ~/.bash_completion.d/prodimg\n\n\
                  Generate zsh completions:\n    prodimg completions zsh > ~/.zfunc/_prodimg\n\n\
                  Generate fish completions:\n    prodimg completions fish > ~/.config/fish/completions/prodimg.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
