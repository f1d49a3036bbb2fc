use aggregated_writer::{stringify, AggregatedWriter, ScriptedSink, Sink, Step};
use std::env;
use std::io::{self, ErrorKind, Write};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: stringify_demo <item>...");
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    let n = stringify::aggregated(Sink::Raw(&mut stdout), &args)?;
    writeln!(stdout)?;
    eprintln!("Wrote {} bytes", n);

    // Same items against a sink that breaks on its second write.
    let sink = ScriptedSink::new([Step::AcceptAll, Step::Fail(ErrorKind::BrokenPipe)]);
    let mut w = AggregatedWriter::new(sink);
    let _ = stringify::aggregated(Sink::from(&mut w), &args);
    let (n, err) = w.result();
    eprintln!(
        "Broken sink: {} bytes, error: {:?}, sink calls: {}",
        n,
        err.map(|e| e.to_string()),
        w.get_ref().calls()
    );

    Ok(())
}
