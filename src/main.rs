use std::{env, io, process};

use wise2dba::cli::Dispatcher;
use wise2dba::logging;

fn main() {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let code = Dispatcher::new().run(&args, &mut io::stdout().lock());
    process::exit(code);
}
