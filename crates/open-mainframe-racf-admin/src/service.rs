//! The native security service boundary.
//!
//! [`SecurityService`] is the only way requests leave the process. The
//! default [`Irrsmo00`] binding calls the RACF XML interface on z/OS; on any
//! other platform it answers every request with an empty buffer so clients
//! can still be built and used to generate requests.

use tracing::debug;

use crate::error::RacfAdminError;

/// IRRSMO00 options: run the request.
pub const OPTS_DEFAULT: u32 = 1;

/// IRRSMO00 options: run the request, prechecking that the profile exists.
pub const OPTS_PRECHECK: u32 = 3;

/// Result buffer size handed to IRRSMO00.
pub const RESULT_BUFFER_SIZE: usize = 100_000;

/// Transport for IBM-1047 encoded request documents.
pub trait SecurityService: Send + Sync {
    /// Send `request` and return the raw (IBM-1047) result document.
    fn call(&self, request: &[u8], opts: u32) -> Result<Vec<u8>, RacfAdminError>;
}

/// The IRRSMO00 callable service.
#[derive(Debug, Clone)]
pub struct Irrsmo00 {
    buffer_size: usize,
}

impl Default for Irrsmo00 {
    fn default() -> Self {
        Self::new()
    }
}

impl Irrsmo00 {
    /// A binding with the default result buffer.
    pub fn new() -> Self {
        Self {
            buffer_size: RESULT_BUFFER_SIZE,
        }
    }

    /// Size of the result buffer.
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

impl SecurityService for Irrsmo00 {
    fn call(&self, request: &[u8], opts: u32) -> Result<Vec<u8>, RacfAdminError> {
        debug!(bytes = request.len(), opts, "calling IRRSMO00");
        #[cfg(target_os = "zos")]
        {
            native::call(request, opts, self.buffer_size)
        }
        #[cfg(not(target_os = "zos"))]
        {
            tracing::warn!("IRRSMO00 is only available on z/OS; returning an empty result");
            Ok(Vec::new())
        }
    }
}

#[cfg(target_os = "zos")]
mod native {
    use crate::error::RacfAdminError;

    const NUM_PARMS: u32 = 17;
    const FUNCTION_XML_REQUEST: u32 = 1;

    extern "C" {
        #[link_name = "IRRSMO64"]
        fn irrsmo64(
            work_area: *mut u8,
            alet_saf_rc: *mut u32,
            saf_rc: *mut u32,
            alet_racf_rc: *mut u32,
            racf_rc: *mut u32,
            alet_racf_rsn: *mut u32,
            racf_rsn: *mut u32,
            num_parms: *mut u32,
            function: *mut u32,
            options: *mut u32,
            request_length: *mut u32,
            request: *const u8,
            request_handle: *mut u8,
            run_as_userid: *mut u8,
            acee: *mut u32,
            result_length: *mut u32,
            result: *mut u8,
        );
    }

    pub(super) fn call(
        request: &[u8],
        opts: u32,
        buffer_size: usize,
    ) -> Result<Vec<u8>, RacfAdminError> {
        let mut request_length = u32::try_from(request.len()).map_err(|_| {
            RacfAdminError::ServiceCall {
                message: format!("request of {} bytes is too large", request.len()),
            }
        })?;
        let mut result_length = u32::try_from(buffer_size).map_err(|_| {
            RacfAdminError::ServiceCall {
                message: format!("result buffer of {} bytes is too large", buffer_size),
            }
        })?;
        let mut result = vec![0u8; buffer_size];
        let mut work_area = [0u8; 1024];
        let mut request_handle = [0u8; 64];
        let mut run_as_userid = [0u8; 9];
        let (mut alet_saf_rc, mut alet_racf_rc, mut alet_racf_rsn) = (0u32, 0u32, 0u32);
        let (mut saf_rc, mut racf_rc, mut racf_rsn, mut acee) = (0u32, 0u32, 0u32, 0u32);
        let mut num_parms = NUM_PARMS;
        let mut function = FUNCTION_XML_REQUEST;
        let mut options = opts;

        // SAFETY: every pointer refers to a live local buffer of the size
        // IRRSMO64 expects, and `result_length` bounds the result writes.
        unsafe {
            irrsmo64(
                work_area.as_mut_ptr(),
                &mut alet_saf_rc,
                &mut saf_rc,
                &mut alet_racf_rc,
                &mut racf_rc,
                &mut alet_racf_rsn,
                &mut racf_rsn,
                &mut num_parms,
                &mut function,
                &mut options,
                &mut request_length,
                request.as_ptr(),
                request_handle.as_mut_ptr(),
                run_as_userid.as_mut_ptr(),
                &mut acee,
                &mut result_length,
                result.as_mut_ptr(),
            );
        }

        tracing::debug!(saf_rc, racf_rc, racf_rsn, "IRRSMO64 returned");
        result.truncate((result_length as usize).min(buffer_size));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Irrsmo00::new().buffer_size(), 100_000);
        assert_eq!(OPTS_DEFAULT, 1);
        assert_eq!(OPTS_PRECHECK, 3);
    }

    #[cfg(not(target_os = "zos"))]
    #[test]
    fn test_off_platform_call_returns_empty_buffer() {
        let service = Irrsmo00::default();
        assert!(service.call(b"<securityrequest/>", OPTS_DEFAULT).unwrap().is_empty());
    }
}
