/// reading of fitting tasks, fitting and saving of the fitted kinetics
#[allow(non_snake_case)]
pub mod cli_main;
