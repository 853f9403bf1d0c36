//! Subcommand implementations.

use std::collections::HashMap;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use ringcore::{Ring, RING_SPAN};
use serde::Serialize;

/// Ring membership shared by every subcommand.
#[derive(Args)]
pub struct RingArgs {
    /// Node name; repeat once per member
    #[arg(long = "node", required = true)]
    pub nodes: Vec<String>,

    /// Virtual points per node
    #[arg(long, default_value_t = 256)]
    pub replicas: usize,
}

impl RingArgs {
    fn build_ring(&self) -> Result<Ring> {
        if self.replicas == 0 {
            bail!("--replicas must be at least 1");
        }
        let mut ring = Ring::new(self.replicas);
        ring.add(self.nodes.iter().cloned());
        Ok(ring)
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve which node owns each key
    Lookup {
        #[command(flatten)]
        ring: RingArgs,

        /// Keys to resolve
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Report per-node interval widths and sampled load
    Distribution {
        #[command(flatten)]
        ring: RingArgs,

        /// Also tally lookups for the keys "0".."N"
        #[arg(long)]
        sample: Option<usize>,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Command {
    pub fn execute(self) -> Result<()> {
        match self {
            Command::Lookup { ring, keys } => lookup(&ring, &keys),
            Command::Distribution { ring, sample, json } => distribution(&ring, sample, json),
        }
    }
}

fn lookup(args: &RingArgs, keys: &[String]) -> Result<()> {
    let ring = args.build_ring()?;
    for key in keys {
        let node = ring.get(key)?;
        println!("{key}\t{node}");
    }
    Ok(())
}

fn distribution(args: &RingArgs, sample: Option<usize>, json: bool) -> Result<()> {
    let ring = args.build_ring()?;
    let report = build_report(&ring, sample)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for row in &report {
            match row.sampled {
                Some(count) => {
                    println!("{}\t{}\t{:.3}\t{}", row.node, row.width, row.share, count)
                }
                None => println!("{}\t{}\t{:.3}", row.node, row.width, row.share),
            }
        }
    }
    Ok(())
}

/// One node's row in the distribution report, widest node first.
#[derive(Debug, Serialize)]
struct NodeReport {
    node: String,
    /// Interval width on the 2^32 ring.
    width: u64,
    /// Fraction of the ring this node owns.
    share: f64,
    /// Lookup tally when `--sample` was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    sampled: Option<usize>,
}

fn build_report(ring: &Ring, sample: Option<usize>) -> Result<Vec<NodeReport>> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    if let Some(samples) = sample {
        for i in 0..samples {
            *counts.entry(ring.get(&i.to_string())?).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<NodeReport> = ring
        .nodes()
        .into_iter()
        .map(|(node, width)| {
            let sampled = sample.map(|_| counts.get(node.as_str()).copied().unwrap_or(0));
            NodeReport {
                width,
                share: width as f64 / RING_SPAN as f64,
                sampled,
                node,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.width.cmp(&a.width).then_with(|| a.node.cmp(&b.node)));
    Ok(rows)
}
