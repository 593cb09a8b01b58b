use pyo3::{prelude::*, types::PyBytes};
use unibridge::{ScratchBuffers, Validation};

use crate::errors::to_py_err;

/// Reusable converter that keeps its buffers between calls.
#[pyclass(module = "unibridge")]
#[derive(Debug, Default)]
pub struct Transcoder {
    scratch: ScratchBuffers,
    validation: Validation,
}

#[pymethods]
impl Transcoder {
    #[new]
    #[pyo3(signature = (strict = false))]
    pub fn new(strict: bool) -> Self {
        tracing::debug!(strict, "creating transcoder");
        Self {
            scratch: ScratchBuffers::new(),
            validation: Validation::from_strict(strict),
        }
    }

    #[getter]
    pub fn strict(&self) -> bool {
        self.validation.is_strict()
    }

    /// UTF-16 code units to UTF-8 `bytes`.
    pub fn encode<'py>(
        &mut self,
        py: Python<'py>,
        units: Vec<u16>,
    ) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self
            .scratch
            .utf16_to_utf8_nul(&units, self.validation)
            .map_err(to_py_err)?;
        Ok(PyBytes::new(py, without_nul(bytes)))
    }

    /// Encodes two strings that are used together, such as a name and a
    /// version.
    pub fn encode_pair<'py>(
        &mut self,
        py: Python<'py>,
        first: Vec<u16>,
        second: Vec<u16>,
    ) -> PyResult<(Bound<'py, PyBytes>, Bound<'py, PyBytes>)> {
        let (first, second) = self
            .scratch
            .utf16_pair_to_utf8_nul(&first, &second, self.validation)
            .map_err(to_py_err)?;
        Ok((
            PyBytes::new(py, without_nul(first)),
            PyBytes::new(py, without_nul(second)),
        ))
    }

    /// UTF-8 `bytes` to a list of UTF-16 code units.
    pub fn decode(&mut self, data: &[u8]) -> PyResult<Vec<u16>> {
        let units = self
            .scratch
            .utf8_to_utf16_nul(data, self.validation)
            .map_err(to_py_err)?;
        Ok(without_nul(units).to_vec())
    }

    /// Sizes of the `(primary, secondary, wide)` buffers.
    pub fn capacities(&self) -> (usize, usize, usize) {
        let caps = self.scratch.capacities();
        (caps.primary, caps.secondary, caps.wide)
    }

    fn __repr__(&self) -> String {
        format!("Transcoder(strict={})", if self.strict() { "True" } else { "False" })
    }
}

fn without_nul<T>(terminated: &[T]) -> &[T] {
    terminated.split_last().map_or(terminated, |(_, text)| text)
}
