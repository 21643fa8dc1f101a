// src/output.rs
use crate::sweep::SweepRow;
use std::fs::File;
use std::io::{self, Write};

pub fn write_sweep_to_csv(filename: &str, rows: &[SweepRow]) -> io::Result<()> {
    let mut file = File::create(filename)?;
    write_sweep(&mut file, rows)
}

pub fn write_sweep<W: Write>(out: &mut W, rows: &[SweepRow]) -> io::Result<()> {
    writeln!(out, "steps,estimator,value,delta,gamma,theta,value_error")?;
    for row in rows {
        let r = &row.result;
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            row.steps,
            row.estimator,
            r.value,
            r.delta,
            r.gamma,
            r.theta,
            row.value_error()
        )?;
    }
    Ok(())
}
