use optiviz_core::{Arity, Objective};

use super::Error;

/// Determines the objective's arity and checks the argument lengths against it.
///
/// Checks run in order: arity, then `init_vector`, then `plot_centre` (when
/// given). Nothing is rendered or allocated for the run.
///
/// # Errors
///
/// Returns [`Error::Arity`] if the objective takes other than 1 or 2 free
/// parameters, or [`Error::DimensionMismatch`] naming the first argument whose
/// length disagrees with the arity.
pub fn validate<O: Objective>(
    objective: &O,
    init_vector: &[f64],
    plot_centre: Option<&[f64]>,
) -> Result<Arity, Error> {
    let arity = Arity::of(objective)?;

    check_len("init_vector", init_vector, arity)?;
    if let Some(centre) = plot_centre {
        check_len("plot_centre", centre, arity)?;
    }

    Ok(arity)
}

fn check_len(argument: &'static str, values: &[f64], arity: Arity) -> Result<(), Error> {
    if values.len() == arity.count() {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            argument,
            expected: arity.count(),
            found: values.len(),
        })
    }
}

/// Converts a validated argument into a fixed-size array.
pub(super) fn fixed<const N: usize>(argument: &'static str, values: &[f64]) -> Result<[f64; N], Error> {
    values.try_into().map_err(|_| Error::DimensionMismatch {
        argument,
        expected: N,
        found: values.len(),
    })
}

/// Returns the plot centre, defaulting to the origin.
pub(super) fn centre<const N: usize>(plot_centre: Option<&[f64]>) -> Result<[f64; N], Error> {
    plot_centre.map_or(Ok([0.0; N]), |centre| fixed("plot_centre", centre))
}
