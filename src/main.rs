use revisr::{PracticeSummary, RevisrError, UiError};

fn main() {
    match revisr::run() {
        Ok(PracticeSummary {
            practiced,
            exports,
            unsaved,
        }) => {
            println!("You practiced {practiced} item(s) this session");
            if unsaved {
                println!("Unsaved progress was discarded, press 's' before quitting to export it");
            } else if exports > 0 {
                println!("Progress exported {exports} time(s)");
            }
        }
        Err(err) => match err {
            RevisrError::Ui(err) => match err {
                UiError::Io(err) => eprintln!("UiError: IoError: {err}"),
                UiError::InUse | UiError::Poisoned => eprintln!("UiError: {err}"),
            },
            RevisrError::Panic(message) => eprintln!("Panicked: {message}"),
        },
    }
}
