use std::fs;
use std::io::{self, Cursor, Seek, SeekFrom, Write};
use std::path::Path;

use cqdb::CQDBWriter;

use super::dictionary::Dictionary;
use super::feature_gen::{Feature, FeatureGenerator, FeatureRefs, FeatureType};

const HEADER_SIZE: u64 = 48;
const FORMAT_VERSION: u32 = 100;

/// Feature set with zero-weight features and orphaned attributes removed
struct PrunedModel {
    features: Vec<Feature>,
    attr_refs: Vec<FeatureRefs>,
    label_refs: Vec<FeatureRefs>,
    attrs: Dictionary,
}

impl PrunedModel {
    fn new(fgen: &FeatureGenerator, attrs: &Dictionary) -> Self {
        // old fid -> new fid
        let mut fmap = vec![None; fgen.features.len()];
        let mut features = Vec::new();
        for (fid, feature) in fgen.features.iter().enumerate() {
            if feature.weight != 0.0 {
                fmap[fid] = Some(features.len() as u32);
                features.push(feature.clone());
            }
        }
        let remap = |refs: &FeatureRefs| FeatureRefs {
            fids: refs
                .fids
                .iter()
                .filter_map(|&fid| fmap[fid as usize])
                .collect(),
        };

        // attributes keep their relative order; those without weights vanish
        let mut amap = vec![None; fgen.attr_refs.len()];
        let mut kept_attrs = Dictionary::new();
        let mut attr_refs = Vec::new();
        for (aid, refs) in fgen.attr_refs.iter().enumerate() {
            let refs = remap(refs);
            if refs.fids.is_empty() {
                continue;
            }
            if let Some(name) = attrs.get_name(aid as u32) {
                amap[aid] = Some(kept_attrs.get_or_insert(name));
                attr_refs.push(refs);
            }
        }

        for feature in &mut features {
            if feature.ftype == FeatureType::State {
                if let Some(new_aid) = amap[feature.src as usize] {
                    feature.src = new_aid;
                }
            }
        }

        let label_refs = fgen.label_refs.iter().map(remap).collect();

        Self {
            features,
            attr_refs,
            label_refs,
            attrs: kept_attrs,
        }
    }
}

fn to_u32<T: TryInto<u32>>(value: T, what: &str) -> io::Result<u32> {
    value.try_into().map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} exceeds u32::MAX", what),
        )
    })
}

fn put_u32(buf: &mut Cursor<Vec<u8>>, value: u32) -> io::Result<()> {
    buf.write_all(&value.to_le_bytes())
}

/// Serialises trained weights in the CRFsuite `crf1d` model format
pub struct ModelWriter;

impl ModelWriter {
    /// Write the model to `filename`, creating or truncating it
    pub fn write(
        filename: &Path,
        fgen: &FeatureGenerator,
        labels: &Dictionary,
        attrs: &Dictionary,
    ) -> io::Result<()> {
        let bytes = Self::to_bytes(fgen, labels, attrs)?;
        fs::write(filename, bytes)
    }

    /// Encode the model into memory
    pub fn to_bytes(
        fgen: &FeatureGenerator,
        labels: &Dictionary,
        attrs: &Dictionary,
    ) -> io::Result<Vec<u8>> {
        let model = PrunedModel::new(fgen, attrs);
        let mut buf = Cursor::new(Vec::new());
        buf.write_all(&[0u8; HEADER_SIZE as usize])?;

        let off_features = to_u32(buf.position(), "feature offset")?;
        Self::write_features(&mut buf, &model.features)?;

        let off_labels = to_u32(buf.position(), "label offset")?;
        Self::write_cqdb(&mut buf, labels)?;

        let off_attrs = to_u32(buf.position(), "attribute offset")?;
        Self::write_cqdb(&mut buf, &model.attrs)?;

        // two extra slots for the BOS/EOS pseudo labels CRFsuite reserves
        Self::align(&mut buf)?;
        let off_label_refs = to_u32(buf.position(), "label refs offset")?;
        Self::write_refs(&mut buf, b"LFRF", &model.label_refs, labels.len() + 2)?;

        Self::align(&mut buf)?;
        let off_attr_refs = to_u32(buf.position(), "attribute refs offset")?;
        Self::write_refs(&mut buf, b"AFRF", &model.attr_refs, model.attr_refs.len())?;

        let size = to_u32(buf.position(), "model size")?;
        buf.seek(SeekFrom::Start(0))?;
        buf.write_all(b"lCRF")?;
        put_u32(&mut buf, size)?;
        buf.write_all(b"FOMC")?;
        for value in [
            FORMAT_VERSION,
            to_u32(model.features.len(), "feature count")?,
            to_u32(labels.len(), "label count")?,
            to_u32(model.attrs.len(), "attribute count")?,
            off_features,
            off_labels,
            off_attrs,
            off_label_refs,
            off_attr_refs,
        ] {
            put_u32(&mut buf, value)?;
        }

        Ok(buf.into_inner())
    }

    fn align(buf: &mut Cursor<Vec<u8>>) -> io::Result<()> {
        let pad = (4 - buf.position() % 4) % 4;
        buf.write_all(&[0u8; 3][..pad as usize])
    }

    fn write_cqdb(buf: &mut Cursor<Vec<u8>>, dict: &Dictionary) -> io::Result<()> {
        // the database is finalised when the writer drops
        let mut writer = CQDBWriter::new(&mut *buf)?;
        for (s, id) in dict.iter() {
            writer.put(s, id)?;
        }
        Ok(())
    }

    fn write_features(buf: &mut Cursor<Vec<u8>>, features: &[Feature]) -> io::Result<()> {
        let count = to_u32(features.len(), "feature count")?;
        let size = to_u32(12u64 + u64::from(count) * 20, "feature chunk size")?;
        buf.write_all(b"FEAT")?;
        put_u32(buf, size)?;
        put_u32(buf, count)?;
        for f in features {
            put_u32(buf, f.ftype as u32)?;
            put_u32(buf, f.src)?;
            put_u32(buf, f.dst)?;
            buf.write_all(&f.weight.to_le_bytes())?;
        }
        Ok(())
    }

    /// Write a reference chunk: an offset table of `slots` entries followed by
    /// `count, fid...` lists. Slots beyond `refs.len()` keep a zero offset.
    fn write_refs(
        buf: &mut Cursor<Vec<u8>>,
        magic: &[u8; 4],
        refs: &[FeatureRefs],
        slots: usize,
    ) -> io::Result<()> {
        let start = buf.position();
        let header = 12u64 + 4 * slots as u64;

        let mut offsets = vec![0u32; slots];
        let mut next = start + header;
        for (slot, r) in offsets.iter_mut().zip(refs) {
            *slot = to_u32(next, "reference offset")?;
            next += 4 + 4 * r.fids.len() as u64;
        }

        buf.write_all(magic)?;
        put_u32(buf, to_u32(next - start, "reference chunk size")?)?;
        put_u32(buf, to_u32(slots, "reference count")?)?;
        for offset in offsets {
            put_u32(buf, offset)?;
        }
        for r in refs {
            put_u32(buf, to_u32(r.fids.len(), "reference length")?)?;
            for &fid in &r.fids {
                put_u32(buf, fid)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Attribute, Instance};
    use crate::train::feature_gen::FeatureSelection;

    fn u32_at(bytes: &[u8], pos: usize) -> u32 {
        u32::from_le_bytes(bytes[pos..pos + 4].try_into().unwrap())
    }

    #[test]
    fn test_header_and_pruning() {
        let mut attrs = Dictionary::new();
        let mut labels = Dictionary::new();
        let a = attrs.get_or_insert("a");
        let b = attrs.get_or_insert("b");
        let x = labels.get_or_insert("X");
        let y = labels.get_or_insert("Y");

        let mut inst = Instance::with_capacity(2);
        inst.push(vec![Attribute::new(a, 1.0)], x);
        inst.push(vec![Attribute::new(b, 1.0)], y);
        let mut fgen = FeatureGenerator::generate(
            &[inst],
            &attrs,
            &labels,
            FeatureSelection::default(),
        )
        .unwrap();
        // a/X, b/Y, X->Y; drop b/Y
        let weights: Vec<f64> = fgen
            .features
            .iter()
            .map(|f| {
                if f.ftype == FeatureType::State && f.src == b {
                    0.0
                } else {
                    0.5
                }
            })
            .collect();
        fgen.set_weights(&weights);

        let bytes = ModelWriter::to_bytes(&fgen, &labels, &attrs).unwrap();
        assert_eq!(&bytes[0..4], b"lCRF");
        assert_eq!(u32_at(&bytes, 4) as usize, bytes.len());
        assert_eq!(&bytes[8..12], b"FOMC");
        assert_eq!(u32_at(&bytes, 12), FORMAT_VERSION);
        assert_eq!(u32_at(&bytes, 16), 2); // features
        assert_eq!(u32_at(&bytes, 20), 2); // labels
        assert_eq!(u32_at(&bytes, 24), 1); // attributes

        let off_features = u32_at(&bytes, 28) as usize;
        assert_eq!(off_features, HEADER_SIZE as usize);
        assert_eq!(&bytes[off_features..off_features + 4], b"FEAT");

        let off_label_refs = u32_at(&bytes, 40) as usize;
        assert_eq!(off_label_refs % 4, 0);
        assert_eq!(&bytes[off_label_refs..off_label_refs + 4], b"LFRF");
        assert_eq!(u32_at(&bytes, off_label_refs + 8), 4);

        let off_attr_refs = u32_at(&bytes, 44) as usize;
        assert_eq!(&bytes[off_attr_refs..off_attr_refs + 4], b"AFRF");
        assert_eq!(u32_at(&bytes, off_attr_refs + 8), 1);
    }
}
