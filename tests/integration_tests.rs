use async_trait::async_trait;
use paleoclimate::datasets::{DatasetLoader, Fetcher, Variant};
use paleoclimate::models::{MarkerStyler, Palette, ProxyTypeTable};
use paleoclimate::processors::{map_proxy_network, MapRequest};
use paleoclimate::utils::Settings;
use paleoclimate::writers::MapOptions;
use paleoclimate::{PaleoError, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

struct FixtureFetcher {
    source: PathBuf,
    calls: AtomicUsize,
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(tokio::fs::copy(&self.source, dest).await?)
    }
}

fn write_network(path: &Path, codes: &[i32]) {
    let lat: Vec<f32> = (0..codes.len()).map(|i| -60.0 + 10.0 * i as f32).collect();
    let lon: Vec<f32> = (0..codes.len()).map(|i| -150.0 + 25.0 * i as f32).collect();

    let mut file = netcdf::create(path).expect("create fixture");
    file.add_dimension("site", codes.len()).unwrap();
    file.add_attribute(
        "title",
        "2,000 Year Hemispheric and Global Surface Temperature Reconstructions: Infilled Proxy Data",
    )
    .unwrap();
    {
        let mut var = file.add_variable::<f32>("lat", &["site"]).unwrap();
        var.put_values(&lat, ..).unwrap();
    }
    {
        let mut var = file.add_variable::<f32>("lon", &["site"]).unwrap();
        var.put_values(&lon, ..).unwrap();
    }
    {
        let mut var = file.add_variable::<i32>("data_type", &["site"]).unwrap();
        var.put_values(codes, ..).unwrap();
    }
}

fn loader_for(source: PathBuf) -> DatasetLoader<FixtureFetcher> {
    DatasetLoader::new(
        FixtureFetcher {
            source,
            calls: AtomicUsize::new(0),
        },
        Settings::default(),
    )
}

fn request(home: &Path, output: PathBuf) -> MapRequest {
    MapRequest {
        variant: Variant::Infilled,
        data_home: Some(home.to_path_buf()),
        download_if_missing: true,
        output,
        options: MapOptions::default(),
    }
}

#[tokio::test]
async fn test_download_then_map() {
    let scratch = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let source = scratch.path().join("source.nc");
    write_network(&source, &[2000, 3000, 3001, 5000, 6001, 7500, 8001, 9000]);

    let loader = loader_for(source);
    let output = scratch.path().join("map_of_data_types.html");

    let report = map_proxy_network(&loader, &request(home.path(), output.clone()), MarkerStyler::default())
        .await
        .unwrap();

    assert_eq!(report.total_sites, 8);
    assert_eq!(report.categories["Tree ring"].sites, 2);
    assert!(home.path().join("mann2008infilled.nc").is_file());

    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("ix: 6; data: Ice cores"));
    assert!(html.contains("#8b4513"));

    // A second map of the same variant reuses the cached file.
    map_proxy_network(&loader, &request(home.path(), output), MarkerStyler::default())
        .await
        .unwrap();
    assert_eq!(loader.fetcher().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_bad_code_produces_no_map() {
    let scratch = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let source = scratch.path().join("source.nc");
    write_network(&source, &[3000, 1500, 8000]);

    let loader = loader_for(source);
    let output = scratch.path().join("map.html");

    let err = map_proxy_network(&loader, &request(home.path(), output.clone()), MarkerStyler::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PaleoError::UnrecognizedCategory { code: 1500, site: 1 }
    ));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_substituted_table_and_palette() {
    let scratch = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let source = scratch.path().join("source.nc");
    write_network(&source, &[2100, 3100]);

    let loader = loader_for(source);
    let output = scratch.path().join("map.html");
    let styler = MarkerStyler::new(
        ProxyTypeTable::new([(2100, "Pollen"), (3100, "Varve")]),
        Palette::new(["#112233", "#445566"]),
    );

    let report = map_proxy_network(&loader, &request(home.path(), output.clone()), styler)
        .await
        .unwrap();

    assert_eq!(report.categories["Varve"].fill_colors, vec!["#445566".to_string()]);
    let html = std::fs::read_to_string(&output).unwrap();
    assert!(html.contains("Pollen"));
}

#[tokio::test]
async fn test_offline_without_cache() {
    let scratch = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let loader = loader_for(scratch.path().join("unused.nc"));

    let mut req = request(home.path(), scratch.path().join("map.html"));
    req.download_if_missing = false;
    req.variant = Variant::Raw;

    let err = map_proxy_network(&loader, &req, MarkerStyler::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PaleoError::DataUnavailable { .. }));
    assert_eq!(loader.fetcher().calls.load(Ordering::SeqCst), 0);
}
