use once_cell::sync::Lazy;
use std::env;

pub static UPLOAD_ROOT: Lazy<String> = Lazy::new(|| {
    env::var("BAZAAR_UPLOAD_URL")
        .unwrap_or_else(|_| "http://localhost:1337".to_string())
        .trim_end_matches('/')
        .to_string()
});

pub static ASSET_ROOT: Lazy<String> = Lazy::new(|| {
    env::var("BAZAAR_ASSET_URL")
        .unwrap_or_else(|_| UPLOAD_ROOT.clone())
        .trim_end_matches('/')
        .to_string()
});

pub static LISTING_ROOT: Lazy<String> = Lazy::new(|| {
    env::var("BAZAAR_LISTING_URL")
        .unwrap_or_else(|_| UPLOAD_ROOT.clone())
        .trim_end_matches('/')
        .to_string()
});

pub static UPLOAD_ENDPOINT: Lazy<String> = Lazy::new(|| format!("{}/api/upload", *UPLOAD_ROOT));

pub static PRODUCTS_ENDPOINT: Lazy<String> =
    Lazy::new(|| format!("{}/api/products", *LISTING_ROOT));
