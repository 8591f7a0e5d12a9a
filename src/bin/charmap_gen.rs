// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Generates Rust mapping table modules from mapping files.
//!
//! Reads one mapping file, builds the forward table and its inversion,
//! and writes one generated module per table into the output directory.

use std::fs::File;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use charmap::emit::write_table_module;
use charmap::mapping::Mapping;
use charmap::mapping::invert_mappings;
use charmap::mapping::parse_mappings;
use charmap::table::MappingTable;

#[derive(Parser)]
#[command(
    name = "charmap-gen",
    about = "Generate mapping table modules from unicode mapping files",
    version
)]
struct Args {
    /// Mapping file with one `0x<source>\t0x<destination>` pair per line.
    input: PathBuf,
    /// Directory receiving the generated modules.
    output_directory: PathBuf,
    /// Table name for the forward mapping, also the output file stem.
    name: String,
    /// Table name for the inverted mapping, also the output file stem.
    reverse_name: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let input = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let mappings = parse_mappings(BufReader::new(input))?;
    let inverted = invert_mappings(&mappings);

    generate(&args.output_directory, &args.name, &mappings)?;
    generate(&args.output_directory, &args.reverse_name, &inverted)?;
    Ok(())
}

fn generate(output_directory: &Path, name: &str, mappings: &[Mapping]) -> anyhow::Result<()> {
    let table = MappingTable::from_mappings(mappings)?;
    let path = output_directory.join(format!("{name}.rs"));
    let file =
        File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_table_module(&mut out, &table, name)?;
    out.flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!(
        "generated {} ({} mappings in {} blocks, {} populated)",
        path.display(),
        table.num_mappings(),
        table.num_blocks(),
        table.num_populated_blocks()
    );
    Ok(())
}
