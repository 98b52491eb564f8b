//! Resolve peer endpoints given on the command line.
//!
//! Each argument is parsed as an endpoint (`192.0.2.1`, `[2001:db8::1]:1194`,
//! `hub.example.com:openvpn`, ...) and resolved both ways: blocking, and
//! through a completion callback.
//!
//! ```text
//! cargo run --example resolve_peer -- 192.0.2.1 localhost:openvpn
//! ```

use peerlink::config::ResolveOptions;
use peerlink::dns::GaiResolver;
use peerlink::endpoint::Endpoint;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let resolver = Arc::new(GaiResolver::new());
    let options = ResolveOptions::default();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("usage: resolve_peer <endpoint>...");
        return Ok(());
    }

    for arg in args {
        let endpoint: Endpoint = arg.parse()?;
        let kind = if endpoint.is_literal() { "literal" } else { "hostname" };
        println!("=== {} ({}) ===", endpoint, kind);

        // Blocking resolution runs on the blocking pool to keep the runtime free.
        let (ep, res, opts) = (endpoint.clone(), resolver.clone(), options.clone());
        match tokio::task::spawn_blocking(move || ep.resolve_with(&*res, &opts)).await? {
            Ok(addr) => println!("resolve:       {}", addr),
            Err(e) => println!("resolve:       error: {}", e),
        }

        let (tx, rx) = tokio::sync::oneshot::channel();
        endpoint.resolve_async_with(&*resolver, &options, move |result| {
            let _ = tx.send(result);
        });
        match rx.await? {
            Ok(results) => {
                for entry in results {
                    println!(
                        "resolve_async: {} ({}:{})",
                        entry.endpoint(),
                        entry.host_name(),
                        entry.service_name()
                    );
                }
            }
            Err(e) => println!("resolve_async: error: {}", e),
        }
    }

    Ok(())
}
