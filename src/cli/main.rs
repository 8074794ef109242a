use confregion::prob::*;
use confregion::sim::*;
use structopt::*;
use nalgebra::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use anyhow::{anyhow, Context};
use log::info;

/// Compare unconstrained samples of a bivariate normal with samples restricted
/// to its 95.45% (2-sigma) and 68.27% (1-sigma) confidence regions. Samples are
/// written as CSV.
#[derive(StructOpt, Debug)]
#[structopt(name = "confregion")]
pub struct Opts {

    /// Seed of the random generator shared by the three strategies.
    #[structopt(long, default_value = "100")]
    seed : u64,

    /// Number of samples per strategy.
    #[structopt(short, default_value = "1000")]
    n : usize,

    /// JSON file with the sampler configuration.
    #[structopt(long, parse(from_os_str))]
    config : Option<PathBuf>,

    /// Also write the 1-sigma and 2-sigma ellipse outlines, with this many points each.
    #[structopt(long)]
    ellipse : Option<usize>,

    /// Output file (defaults to the standard output).
    #[structopt(short, long, parse(from_os_str))]
    output : Option<PathBuf>

}

#[derive(Serialize)]
struct Row<'a> {
    strategy : &'a str,
    x0 : f64,
    x1 : f64
}

fn write_rows<W>(wtr : &mut csv::Writer<W>, strategy : &str, m : &DMatrix<f64>) -> anyhow::Result<()>
where
    W : Write
{
    for row in m.row_iter() {
        wtr.serialize(Row { strategy, x0 : row[0], x1 : row[1] })?;
    }
    Ok(())
}

fn open_output(path : &Option<PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let f = File::create(p).with_context(|| format!("Could not create {}", p.display()) )?;
            Ok(Box::new(f))
        },
        None => Ok(Box::new(io::stdout()))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let opts = Opts::from_args();
    let config = match &opts.config {
        Some(path) => SamplerConfig::load_from_path(path)
            .map_err(|e| anyhow!("Error loading configuration {}: {}", path.display(), e) )?,
        None => SamplerConfig::default()
    };
    let mn = MultiNormal::new(
        DVector::from_column_slice(&[0.0, 0.0]),
        DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 9.0])
    )?;
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let sampler = RegionSampler::new(config);
    let mut wtr = csv::Writer::from_writer(open_output(&opts.output)?);

    let unconstrained = mn.sample(&mut rng, opts.n);
    write_rows(&mut wtr, "unconstrained", &unconstrained)?;

    for (name, alpha) in [("region_2sigma", 0.9545), ("region_1sigma", 0.6827)].iter() {
        let region = sampler.sample_with_stats(&mn, &mut rng, opts.n, *alpha)?;
        info!(
            "{}: {} samples below distance {:.4} from {} draws",
            name,
            region.samples.len(),
            region.threshold,
            region.attempts
        );
        write_rows(&mut wtr, name, &region.to_matrix())?;
    }

    if let Some(points) = opts.ellipse {
        for (name, factor) in [("ellipse_1", 1.0), ("ellipse_2", 2.0)].iter() {
            let el = Ellipse::new(&mn, *factor)?;
            write_rows(&mut wtr, name, &el.boundary(points))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
