use tessel_core::hash;

pub struct HashArgs {
    pub strings: Vec<String>,
}

pub fn run(args: HashArgs) {
    print!("{}", execute(&args));
}

/// One line per string: decimal, hex, then the string.
pub fn execute(args: &HashArgs) -> String {
    let mut out = String::new();
    for s in &args.strings {
        let h = hash(s);
        out.push_str(&format!("{h:>10} 0x{h:08X} {s}\n"));
    }
    out
}
