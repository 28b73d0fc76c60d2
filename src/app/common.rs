use anyhow::{Context, Result};
use clap::Arg;
use log::{info, warn};
use std::fs::File;
use std::io::BufReader;
use zinco::io::ModelReader;
use zinco::model::FlatModel;

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the model")
        .required(true)
}

pub(crate) fn read_file_path(
    file_path: &str,
    reader: &mut dyn ModelReader,
) -> Result<FlatModel> {
    reader.add_warning_handler(Box::new(|line, msg| warn!("at line {}: {}", line, msg)));
    let context = || format!(r#"while reading the model file "{}""#, file_path);
    let mut file_reader = BufReader::new(File::open(file_path).with_context(context)?);
    let model = reader.read(&mut file_reader).with_context(context)?;
    info!(
        "the model has {} integer variable(s), {} boolean variable(s) and {} constraint(s)",
        model.n_int_vars(),
        model.n_bool_vars(),
        model.constraints().len(),
    );
    Ok(model)
}
