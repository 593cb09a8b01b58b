mod errors;
mod logging;
mod transcoder;

pub use errors::MalformedInputError;
pub use transcoder::Transcoder;

use ::unibridge::Validation;
use pyo3::{exceptions::PyValueError, prelude::*, types::PyBytes};

use crate::errors::to_py_err;

/// UTF-16 code units to UTF-8 `bytes`.
#[pyfunction]
#[pyo3(signature = (units, strict = false))]
pub fn utf16_to_utf8<'py>(
    py: Python<'py>,
    units: Vec<u16>,
    strict: bool,
) -> PyResult<Bound<'py, PyBytes>> {
    let bytes = ::unibridge::utf16_to_utf8(&units, Validation::from_strict(strict))
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, &bytes))
}

/// UTF-8 `bytes` to a list of UTF-16 code units.
#[pyfunction]
#[pyo3(signature = (data, strict = false))]
pub fn utf8_to_utf16(data: &[u8], strict: bool) -> PyResult<Vec<u16>> {
    ::unibridge::utf8_to_utf16(data, Validation::from_strict(strict)).map_err(to_py_err)
}

/// A Python `str` as the UTF-16 code units a native API would receive.
#[pyfunction]
pub fn str_to_utf16(text: &str) -> PyResult<Vec<u16>> {
    // `&str` has already been validated by the extraction.
    ::unibridge::utf8_to_utf16(text.as_bytes(), Validation::Trusted).map_err(to_py_err)
}

/// UTF-16 code units from a native API back to a Python `str`.
#[pyfunction]
pub fn utf16_to_str(units: Vec<u16>) -> PyResult<String> {
    let bytes = ::unibridge::utf16_to_utf8(&units, Validation::Strict).map_err(to_py_err)?;
    String::from_utf8(bytes).map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pymodule]
#[pyo3(name = "unibridge")]
pub fn unibridge_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    logging::init_tracing();
    m.add_function(wrap_pyfunction!(utf16_to_utf8, m)?)?;
    m.add_function(wrap_pyfunction!(utf8_to_utf16, m)?)?;
    m.add_function(wrap_pyfunction!(str_to_utf16, m)?)?;
    m.add_function(wrap_pyfunction!(utf16_to_str, m)?)?;
    m.add_class::<Transcoder>()?;
    m.add("MalformedInputError", m.py().get_type::<MalformedInputError>())?;
    Ok(())
}
