use std::{
    collections::HashSet,
    error, fmt,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use csv::{QuoteStyle, WriterBuilder};
use itertools::Itertools;
use model::{
    temperature::{DailyTemperature, ThermalRegime, TimeRange},
    Pagination,
};
use utility::file_name::sanitize;
use uuid::Uuid;
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

use crate::database::{DatabaseError, TemperatureRepo};

pub const TIME_TEMPERATURE_FOLDER: &str = "download_observation_time_temperature";
pub const TEMPERATURE_HEIGHT_FOLDER: &str = "download_observation_temperature_height";

const TIME_TEMPERATURE_HEADER: [&str; 4] = ["name", "height", "agg_avg", "time"];
const TEMPERATURE_HEIGHT_HEADER: [&str; 6] =
    ["name", "height", "max", "min", "average_value", "cnt"];

/// Attachment name used for the archive of multiple locations.
pub const ZIP_ATTACHMENT_NAME: &str = "observations.zip";

#[derive(Debug)]
pub enum ExportError {
    Database(DatabaseError),
    Io(io::Error),
    Csv(csv::Error),
    Zip(zip::result::ZipError),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Database(why) => write!(f, "{}", why),
            ExportError::Io(why) => write!(f, "export i/o failed: {}", why),
            ExportError::Csv(why) => write!(f, "could not write csv: {}", why),
            ExportError::Zip(why) => write!(f, "could not write zip: {}", why),
        }
    }
}

impl error::Error for ExportError {}

impl From<DatabaseError> for ExportError {
    fn from(why: DatabaseError) -> Self {
        Self::Database(why)
    }
}

impl From<io::Error> for ExportError {
    fn from(why: io::Error) -> Self {
        Self::Io(why)
    }
}

impl From<csv::Error> for ExportError {
    fn from(why: csv::Error) -> Self {
        Self::Csv(why)
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(why: zip::result::ZipError) -> Self {
        Self::Zip(why)
    }
}

impl From<tokio::task::JoinError> for ExportError {
    fn from(why: tokio::task::JoinError) -> Self {
        Self::Io(io::Error::other(why))
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// A file on disk together with the name the client should save it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub path: PathBuf,
    pub attachment_name: String,
}

/// One of the export folders below the configured export root.
#[derive(Debug, Clone)]
pub struct ExportFolder {
    path: PathBuf,
}

impl ExportFolder {
    pub fn new(root: impl AsRef<Path>, folder: &str) -> Self {
        Self {
            path: root.as_ref().join(folder),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn create(&self) -> io::Result<()> {
        fs::create_dir_all(&self.path)
    }

    /// A path no other request will use, `<stem>-<uuid>.<extension>`.
    pub fn unique_file(&self, stem: &str, extension: &str) -> PathBuf {
        let id = Uuid::new_v4();
        if stem.is_empty() {
            self.path.join(format!("{}.{}", id, extension))
        } else {
            self.path.join(format!("{}-{}.{}", stem, id, extension))
        }
    }
}

/// The two export folders below one export root.
#[derive(Debug, Clone)]
pub struct ExportFolders {
    pub time_temperature: ExportFolder,
    pub temperature_height: ExportFolder,
}

impl ExportFolders {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            time_temperature: ExportFolder::new(&root, TIME_TEMPERATURE_FOLDER),
            temperature_height: ExportFolder::new(&root, TEMPERATURE_HEIGHT_FOLDER),
        }
    }
}

/// File name presented to the client for a single location export.
pub fn attachment_name(location: &str) -> String {
    format!("{}.txt", sanitize(location, "location"))
}

fn float_field(value: Option<f64>) -> String {
    value.map(|value| value.to_string()).unwrap_or_default()
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .from_writer(writer)
}

pub fn write_daily_temperatures<W: Write>(
    writer: W,
    rows: &[DailyTemperature],
) -> Result<()> {
    let mut writer = csv_writer(writer);
    writer.write_record(TIME_TEMPERATURE_HEADER)?;
    for row in rows {
        writer.write_record([
            row.location_name.clone(),
            float_field(row.height),
            float_field(row.average),
            row.day.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_thermal_regime<W: Write>(writer: W, rows: &[ThermalRegime]) -> Result<()> {
    let mut writer = csv_writer(writer);
    writer.write_record(TEMPERATURE_HEIGHT_HEADER)?;
    for row in rows {
        writer.write_record([
            row.location_name.clone(),
            float_field(row.height),
            float_field(row.max),
            float_field(row.min),
            float_field(row.average),
            row.count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Packs `entries` (name inside the archive, file on disk) into a new zip.
pub fn zip_files(zip_path: &Path, entries: &[(String, PathBuf)]) -> Result<()> {
    let mut zip = ZipWriter::new(BufWriter::new(File::create(zip_path)?));
    let options =
        SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, path) in entries {
        zip.start_file(name.as_str(), options)?;
        io::copy(&mut File::open(path)?, &mut zip)?;
    }
    zip.finish()?.flush()?;
    Ok(())
}

async fn write_file<T, F>(path: PathBuf, rows: Vec<T>, write: F) -> Result<()>
where
    T: Send + 'static,
    F: FnOnce(BufWriter<File>, &[T]) -> Result<()> + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let file = BufWriter::new(File::create(&path)?);
        write(file, &rows)
    })
    .await?
}

/// Writes the daily temperature series of `location` into a fresh file of
/// `folder`.
pub async fn export_daily_temperatures<D>(
    database: &D,
    folder: &ExportFolder,
    location: &str,
    pagination: &Pagination,
) -> Result<ExportFile>
where
    D: TemperatureRepo + ?Sized,
{
    let rows = database.daily_temperatures(location, pagination).await?;
    folder.create()?;
    let path = folder.unique_file(&sanitize(location, "location"), "txt");
    write_file(path.clone(), rows, |file, rows| {
        write_daily_temperatures(file, rows)
    })
    .await?;

    log::info!("exported daily temperatures of {} to {}", location, path.display());
    Ok(ExportFile {
        path,
        attachment_name: attachment_name(location),
    })
}

/// Writes the thermal regime of `location` over `range` into a fresh file of
/// `folder`.
pub async fn export_thermal_regime<D>(
    database: &D,
    folder: &ExportFolder,
    location: &str,
    range: &TimeRange,
    pagination: &Pagination,
) -> Result<ExportFile>
where
    D: TemperatureRepo + ?Sized,
{
    let rows = database.thermal_regime(location, range, pagination).await?;
    folder.create()?;
    let path = folder.unique_file(&sanitize(location, "location"), "txt");
    write_file(path.clone(), rows, |file, rows| write_thermal_regime(file, rows)).await?;

    log::info!("exported thermal regime of {} to {}", location, path.display());
    Ok(ExportFile {
        path,
        attachment_name: attachment_name(location),
    })
}

/// Archive entry name for each distinct requested location. Locations whose
/// names sanitise alike get a numbered suffix, `Site_1.txt`, `Site_1-2.txt`.
pub fn entry_names(locations: &[String]) -> Vec<(&str, String)> {
    let mut used = HashSet::new();
    let mut names = vec![];
    for location in locations.iter().unique() {
        let stem = sanitize(location, "location");
        let mut name = format!("{}.txt", stem);
        let mut suffix = 1;
        while !used.insert(name.clone()) {
            suffix += 1;
            name = format!("{}-{}.txt", stem, suffix);
        }
        names.push((location.as_str(), name));
    }
    names
}

/// One daily temperature file per location, packed into a single zip.
/// A location requested twice ends up once in the archive.
pub async fn export_daily_temperatures_zip<D>(
    database: &D,
    folder: &ExportFolder,
    locations: &[String],
    pagination: &Pagination,
) -> Result<ExportFile>
where
    D: TemperatureRepo + ?Sized,
{
    let mut entries = vec![];
    for (location, name) in entry_names(locations) {
        let file = export_daily_temperatures(database, folder, location, pagination).await?;
        entries.push((name, file.path));
    }

    let zip_path = folder.unique_file("", "zip");
    let zip_target = zip_path.clone();
    let parts = entries.clone();
    tokio::task::spawn_blocking(move || zip_files(&zip_target, &parts)).await??;

    let count = entries.len();
    for (_, path) in entries {
        if let Err(why) = fs::remove_file(&path) {
            log::warn!("could not remove {}: {}", path.display(), why);
        }
    }

    log::info!(
        "exported {} location(s) to {}",
        count,
        zip_path.display()
    );
    Ok(ExportFile {
        path: zip_path,
        attachment_name: ZIP_ATTACHMENT_NAME.to_owned(),
    })
}
