use async_trait::async_trait;
use js_sys::{Reflect, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::SubtleCrypto;

use crate::digest::{DigestAlg, DigestError, DigestProvider};

/// SHA-256 through `crypto.subtle.digest`.
///
/// Looks the primitive up on the global object at call time, so it works in
/// windows and workers alike. Insecure contexts have no `crypto.subtle`; those
/// report [`DigestError::CryptographicUnavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SubtleDigest;

fn subtle() -> Option<SubtleCrypto> {
    let global = js_sys::global();
    let crypto = Reflect::get(&global, &JsValue::from_str("crypto")).ok()?;
    if crypto.is_undefined() || crypto.is_null() {
        return None;
    }
    let subtle = Reflect::get(&crypto, &JsValue::from_str("subtle")).ok()?;
    if subtle.is_undefined() || subtle.is_null() {
        return None;
    }
    subtle.dyn_into::<SubtleCrypto>().ok()
}

fn backend(err: JsValue) -> DigestError {
    DigestError::Backend(format!("{:?}", err))
}

#[async_trait(?Send)]
impl DigestProvider for SubtleDigest {
    fn algorithm(&self) -> DigestAlg {
        DigestAlg::Sha256
    }

    async fn digest(&self, data: &[u8]) -> Result<Vec<u8>, DigestError> {
        let subtle = subtle().ok_or(DigestError::CryptographicUnavailable)?;
        let input = Uint8Array::from(data);
        let promise = subtle
            .digest_with_str_and_buffer_source("SHA-256", &input)
            .map_err(backend)?;
        let buffer = JsFuture::from(promise).await.map_err(backend)?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}
