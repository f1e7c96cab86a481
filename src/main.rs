use std::io;

use fintrack::chart;
use fintrack::shell;
use fintrack::store::RecordStore;
use fintrack::types::StoreConfig;

fn main() {
    let store = RecordStore::new(StoreConfig::default());
    let date_format = store.config().date_format.clone();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let result = shell::run(&store, &mut input, &mut output, |transactions| {
        chart::show(transactions, &date_format)
    });
    if let Err(err) = result {
        // A closed stdin mid-prompt just ends the session.
        if err.kind() != io::ErrorKind::UnexpectedEof {
            eprintln!("fintrack: {err}");
            std::process::exit(1);
        }
    }
}
