use pyo3::{create_exception, exceptions::PyValueError, PyErr};
use unibridge::TranscodeError;

create_exception!(
    unibridge,
    MalformedInputError,
    PyValueError,
    "Raised when strict transcoding rejects its input."
);

pub(crate) fn to_py_err(err: TranscodeError) -> PyErr {
    match err {
        TranscodeError::MalformedInput { .. } => MalformedInputError::new_err(err.to_string()),
        TranscodeError::BufferTooSmall { .. } => PyValueError::new_err(err.to_string()),
    }
}
