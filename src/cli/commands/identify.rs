//! Show the identity the pipeline would look up for one file.

use std::path::Path;

use crate::error::{Error, Result, ResultExt};
use crate::metadata::{MetadataResolver, TrackIdentity};

/// Resolve `path` exactly as a fetch run would, without any network call.
pub fn identify(resolver: &MetadataResolver, path: &Path) -> Result<TrackIdentity> {
    if resolver.registry().format_of(path).is_none() {
        return Err(Error::unsupported_file(path));
    }
    std::fs::metadata(path).with_context(format!("Cannot read {}", path.display()))?;
    Ok(resolver.resolve(path))
}

/// Print the resolved identity of an audio file
pub fn cmd_identify(path: &Path) -> anyhow::Result<()> {
    let identity = identify(&MetadataResolver::default(), path)?;

    let show = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    println!("File:     {}", path.display());
    println!("Title:    {}", show(&identity.title));
    println!("Artist:   {}", show(&identity.artist));
    println!("Album:    {}", show(&identity.album));
    match identity.duration_secs {
        Some(secs) => {
            let total = secs.round() as u64;
            println!("Duration: {}:{:02}", total / 60, total % 60);
        }
        None => println!("Duration: -"),
    }

    if identity.lookup_key().is_none() {
        println!("\nMissing title or artist: this file would be skipped.");
    }
    Ok(())
}
