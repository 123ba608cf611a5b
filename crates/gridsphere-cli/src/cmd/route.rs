//! `gs route`: show how a location fragment resolves.

use crate::output::{OutputMode, render};
use clap::Args;
use gridsphere_core::route::{Route, parse_route};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Location fragment, e.g. "#/article/edge-compute-patterns".
    pub fragment: String,
}

#[derive(Debug, Serialize)]
struct RouteOutput {
    input: String,
    route: Route,
    canonical: String,
}

/// Parse the fragment and print the route plus its canonical form.
///
/// # Errors
///
/// Returns an error only if writing output fails.
pub fn run_route(args: &RouteArgs, output: OutputMode) -> anyhow::Result<()> {
    let route = parse_route(&args.fragment);
    let result = RouteOutput {
        input: args.fragment.clone(),
        canonical: route.fragment(),
        route,
    };
    render(output, &result, |r, w| {
        match &r.route {
            Route::Article(id) | Route::Product(id) => {
                writeln!(w, "{}\t{}\t{}", r.route.name(), id, r.canonical)
            }
            Route::Home | Route::Directory => writeln!(w, "{}\t-\t{}", r.route.name(), r.canonical),
        }
    })
}
