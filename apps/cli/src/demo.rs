//! The narrated demonstrations.
//!
//! Resources owned by the program scope live until the end of [`run`], so
//! whatever has not been discarded is released after the closing banner.

use anyhow::Context as _;
use custodian_resource::{Category, Failing, ManagedResource, Scope};

/// Which demonstrations to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Also run the failed-acquisition demonstration.
    pub inject_failure: bool,
}

pub fn run(options: &Options) -> anyhow::Result<()> {
    println!("--- PROGRAM START ---");
    let mut program = Scope::new("program");

    println!("\n--- DEMO 1: Creating and using an object ---");
    let database = program
        .open("R1", "Database")
        .context("opening the database resource")?;
    database.use_for("Query");
    database.use_for("Update");

    println!("\n--- DEMO 2: Object inside a function ---");
    function_with_resource();
    println!("Function 'function_with_resource' has finished.");

    println!("\n--- DEMO 3: Explicit reference removal ---");
    let generic = program
        .open("R3", Category::default())
        .context("opening the generic resource")?;
    generic.use_for("Inspect");
    println!("Discarding the only reference to 'R3'.");
    program.discard("R3")?;
    println!("Reference to 'R3' discarded; its destructor has already run.");

    if options.inject_failure {
        println!("\n--- DEMO 4: Failed acquisition ---");
        failed_acquisition();
    }

    println!("\n--- PROGRAM END ---");
    tracing::debug!(remaining = program.len(), "closing program scope");
    program.close();
    Ok(())
}

fn function_with_resource() {
    let mut temp = ManagedResource::with_category("R2", "File");
    temp.use_for("Write");
    println!("Leaving function 'function_with_resource'.");
}

fn failed_acquisition() {
    let mut socket = ManagedResource::builder("R4")
        .category("Socket")
        .backend(Failing::new("simulated connection refused"))
        .open();
    socket.use_for("Send");
    socket.dispose();
}
