/// Canonical fields of a job record. The label dictionary below is the only
/// way a row reaches one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FilePath,
    FileSize,
    FileType,
    PrinterName,
    Port,
    Sender,
    JobType,
    AfterOutput,
    Dimensions,
    Resolution,
    GrayIccProfile,
    RgbIccProfile,
    CmykIccProfile,
    OutputIccProfile,
    ColorMode,
    DitherType,
    RenderingMode,
    NumberOfCopies,
    NumberOfPages,
    RipStartDatetime,
    RipEndDatetime,
    RipDuration,
    JobPrepareTime,
    OutputStartDatetime,
    OutputEndDatetime,
    OutputDuration,
    JobStatus,
    JobInfo,
}

/// Known labels in declaration order: English first, then Spanish, then the
/// output-phase variants seen only in Spanish exports (two of them with the
/// U+FFFD mojibake the RIP tool produces for accented characters).
///
/// Declaration order matters: the containment fallback in `map_label` takes
/// the first entry that matches.
const LABELS: &[(&str, Field)] = &[
    ("File:", Field::FilePath),
    ("File Size:", Field::FileSize),
    ("File Type:", Field::FileType),
    ("Printer:", Field::PrinterName),
    ("Port:", Field::Port),
    ("Sender:", Field::Sender),
    ("Job Type:", Field::JobType),
    ("After Output:", Field::AfterOutput),
    ("Dimensions:", Field::Dimensions),
    ("Resolution:", Field::Resolution),
    ("Gray ICC Profile:", Field::GrayIccProfile),
    ("RGB ICC Profile:", Field::RgbIccProfile),
    ("CMYK ICC Profile:", Field::CmykIccProfile),
    ("Output ICC Profile:", Field::OutputIccProfile),
    ("Color Mode:", Field::ColorMode),
    ("Dither Type:", Field::DitherType),
    ("Rendering Mode:", Field::RenderingMode),
    ("Number Of Copies:", Field::NumberOfCopies),
    ("Number of Pages:", Field::NumberOfPages),
    ("RIP Start Date and Time:", Field::RipStartDatetime),
    ("RIP End Date and Time:", Field::RipEndDatetime),
    ("RIP Duration:", Field::RipDuration),
    ("Job prepare time", Field::JobPrepareTime),
    ("Info:", Field::JobInfo),
    ("Archivo:", Field::FilePath),
    ("Tamaño del archivo:", Field::FileSize),
    ("Tipo de archivo:", Field::FileType),
    ("Impresora:", Field::PrinterName),
    ("Puerto:", Field::Port),
    ("Remitente:", Field::Sender),
    ("Tipo de trabajo:", Field::JobType),
    ("Después de la salida:", Field::AfterOutput),
    ("Dimensiones:", Field::Dimensions),
    ("Resolución:", Field::Resolution),
    ("Perfil ICC gris:", Field::GrayIccProfile),
    ("Perfil ICC RGB:", Field::RgbIccProfile),
    ("Perfil ICC CMYK:", Field::CmykIccProfile),
    ("Perfil ICC de salida:", Field::OutputIccProfile),
    ("Modo de color:", Field::ColorMode),
    ("Tipo de trama:", Field::DitherType),
    ("Modo de renderizado:", Field::RenderingMode),
    ("Número de copias:", Field::NumberOfCopies),
    ("Número de páginas:", Field::NumberOfPages),
    ("Fecha y hora de inicio de RIP:", Field::RipStartDatetime),
    ("Fecha y hora de finalización de RIP:", Field::RipEndDatetime),
    ("Duración del RIP:", Field::RipDuration),
    ("Tiempo de preparación del trabajo", Field::JobPrepareTime),
    ("Información:", Field::JobInfo),
    ("Fecha y hora de inicio de la salida:", Field::OutputStartDatetime),
    ("Fecha y hora de finalización de la salida:", Field::OutputEndDatetime),
    ("Duración de la salida:", Field::OutputDuration),
    ("Fecha y hora de inicio de salida:", Field::OutputStartDatetime),
    ("Fecha y hora de finalizacion de la salida:", Field::OutputEndDatetime),
    ("Fecha y hora de finalizaci\u{fffd}n de la salida:", Field::OutputEndDatetime),
    ("Duraci\u{fffd}n de la salida:", Field::OutputDuration),
    ("Estado:", Field::JobStatus),
    ("Observaciones:", Field::JobInfo),
];

/// Resolve a cleaned label to a canonical field.
///
/// Exact dictionary hit first; otherwise a case-insensitive containment test
/// either way with colons stripped, so drifted labels ("Estado del trabajo:")
/// still land. Returns None for labels the schema does not know.
pub fn map_label(label: &str) -> Option<Field> {
    if let Some(&(_, field)) = LABELS.iter().find(|(key, _)| *key == label) {
        return Some(field);
    }

    let needle = label.to_lowercase().replace(':', "");
    if needle.is_empty() {
        return None;
    }
    LABELS.iter().find_map(|(key, field)| {
        let key = key.to_lowercase().replace(':', "");
        (needle.contains(&key) || key.contains(&needle)).then_some(*field)
    })
}

/// Bag key for an unresolved label: non-alphanumerics become underscores,
/// lowercased, edge underscores trimmed (labels end in ':').
pub fn slugify(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>()
        .to_lowercase()
        .trim_matches('_')
        .to_string()
}
