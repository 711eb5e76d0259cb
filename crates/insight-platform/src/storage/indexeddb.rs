//! IndexedDB storage backend.
//! Persistent across page reloads; archived conversations and the
//! configuration survive a refresh. Callback-based IDB requests are
//! bridged to futures through JS promises.

use async_trait::async_trait;
use js_sys::{Array, Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{IdbDatabase, IdbObjectStore, IdbOpenDbRequest, IdbRequest, IdbTransactionMode};

use insight_core::ports::StoragePort;
use insight_types::{InsightError, Result};

const DB_NAME: &str = "insight_storage";
const STORE_NAME: &str = "kv";
const DB_VERSION: u32 = 1;

pub struct IndexedDbStorage {
    db: IdbDatabase,
}

fn idb_err(e: JsValue) -> InsightError {
    InsightError::Storage(format!("{:?}", e))
}

impl IndexedDbStorage {
    /// Open (or create) the database and its single key-value store.
    pub async fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| InsightError::Storage("No window object".to_string()))?;

        let factory = window
            .indexed_db()
            .map_err(idb_err)?
            .ok_or_else(|| InsightError::Storage("IndexedDB not available".to_string()))?;

        let open_req = factory.open_with_u32(DB_NAME, DB_VERSION).map_err(idb_err)?;
        install_upgrade_handler(&open_req);

        let db = JsFuture::from(request_promise(&open_req))
            .await
            .map_err(idb_err)?
            .dyn_into::<IdbDatabase>()
            .map_err(idb_err)?;

        Ok(Self { db })
    }

    fn store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore> {
        self.db
            .transaction_with_str_and_mode(STORE_NAME, mode)
            .map_err(idb_err)?
            .object_store(STORE_NAME)
            .map_err(idb_err)
    }
}

/// Create the object store on first open. Runs inside the
/// `upgradeneeded` callback, where errors can only be logged.
fn install_upgrade_handler(open_req: &IdbOpenDbRequest) {
    let req = open_req.clone();
    let on_upgrade = Closure::once(move |_event: web_sys::Event| {
        let db = match req.result().and_then(|r| r.dyn_into::<IdbDatabase>()) {
            Ok(db) => db,
            Err(e) => {
                log::error!("IndexedDB upgrade: no database handle: {:?}", e);
                return;
            }
        };
        if !db.object_store_names().contains(STORE_NAME) {
            if let Err(e) = db.create_object_store(STORE_NAME) {
                log::error!("IndexedDB upgrade: cannot create store: {:?}", e);
            }
        }
    });
    open_req.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));
    on_upgrade.forget();
}

/// Settle once the request fires `success` or `error`.
fn request_promise(req: &IdbRequest) -> Promise {
    let req = req.clone();
    Promise::new(&mut move |resolve, reject| {
        let req_ok = req.clone();
        let on_success = Closure::once(move |_: web_sys::Event| {
            let value = req_ok.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &value);
        });
        let on_error = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("IDB request failed"));
        });
        req.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        req.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_success.forget();
        on_error.forget();
    })
}

async fn settle(req: &IdbRequest) -> Result<JsValue> {
    JsFuture::from(request_promise(req)).await.map_err(idb_err)
}

#[async_trait(?Send)]
impl StoragePort for IndexedDbStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let store = self.store(IdbTransactionMode::Readonly)?;
        let req = store.get(&JsValue::from_str(key)).map_err(idb_err)?;
        let value = settle(&req).await?;

        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let store = self.store(IdbTransactionMode::Readwrite)?;
        let req = store
            .put_with_key(&Uint8Array::from(value), &JsValue::from_str(key))
            .map_err(idb_err)?;
        settle(&req).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let store = self.store(IdbTransactionMode::Readwrite)?;
        let req = store.delete(&JsValue::from_str(key)).map_err(idb_err)?;
        settle(&req).await?;
        Ok(())
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>> {
        let store = self.store(IdbTransactionMode::Readonly)?;
        let req = store.get_all_keys().map_err(idb_err)?;
        let keys: Array = settle(&req).await?.dyn_into().map_err(idb_err)?;

        Ok(keys
            .iter()
            .filter_map(|k| k.as_string())
            .filter(|k| k.starts_with(prefix))
            .collect())
    }

    fn backend_name(&self) -> &str {
        "indexeddb"
    }
}
