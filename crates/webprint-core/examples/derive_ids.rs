use std::io::Read;

use webprint_core::{normalize, serialize, IdentityDeriver, RawFingerprint};

fn main() {
    let mut input = String::new();
    let read = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path).map(|text| input = text),
        None => std::io::stdin().read_to_string(&mut input).map(|_| ()),
    };
    if let Err(err) = read {
        eprintln!("failed to read fingerprint: {}", err);
        std::process::exit(1);
    }

    let raw = match RawFingerprint::from_json(&input) {
        Ok(raw) => raw,
        Err(err) => {
            eprintln!("invalid fingerprint: {}", err);
            std::process::exit(1);
        }
    };

    let deriver = IdentityDeriver::default();
    println!("{}", serialize(&normalize(&raw)));
    match futures::executor::block_on(deriver.derive(&raw)) {
        Ok(ids) => {
            println!("encoded: {}", ids.encoded);
            println!("hash:    {}", ids.hash);
        }
        Err(err) => {
            eprintln!("identity derivation failed: {}", err);
            std::process::exit(1);
        }
    }
}
