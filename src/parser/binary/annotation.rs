//! Create [`Annotation`]s and the [`AnnotationIndex`] from binary
//! representation and vice versa

use super::{push_section, push_str, push_strings, usize_to_u32, Cursor};
use crate::annotations::{Annotation, AnnotationIndex, GeneUniverse};
use crate::{GoError, GoResult, GoTermId, Ontology};

impl Annotation {
    /// Returns a binary representation of the annotation
    ///
    /// The binary layout is defined as:
    ///
    /// | Byte offset | Number of bytes | Description |
    /// | --- | --- | --- |
    /// | 0 | 4 | The length of the remaining blob as big-endian `u32` |
    /// | 4 | 4 + n | The gene symbol, prefixed with its length |
    /// | 8 + n | 4 | The Term ID as big-endian `u32` |
    /// | 12 + n | 4 + m | The evidence code, prefixed with its length |
    /// | .. | 1 | `1` if a database object ID follows, else `0` |
    /// | .. | 4 + x | The database object ID (optional) |
    /// | .. | 4 + .. | Number of references, followed by each reference |
    /// | .. | 4 + .. | Number of *with / from* IDs, followed by each ID |
    ///
    /// # Panics
    ///
    /// This method will panic if the total byte length is longer than `u32::MAX`
    pub(crate) fn as_bytes(&self) -> Vec<u8> {
        let mut blob = Vec::new();
        push_str(&mut blob, self.gene());
        blob.extend_from_slice(&self.term_id().to_be_bytes());
        push_str(&mut blob, self.evidence().as_str());
        match self.db_id() {
            Some(db_id) => {
                blob.push(1u8);
                push_str(&mut blob, db_id);
            }
            None => blob.push(0u8),
        }
        push_strings(&mut blob, self.db_ref().iter().map(String::as_str));
        push_strings(&mut blob, self.with_from().iter().map(String::as_str));

        let mut res = Vec::with_capacity(blob.len() + 4);
        res.extend_from_slice(&usize_to_u32(blob.len()).to_be_bytes());
        res.append(&mut blob);
        res
    }
}

/// Reads one [`Annotation`] and advances the cursor past it
pub(crate) fn annotation_from_cursor(cursor: &mut Cursor) -> GoResult<Annotation> {
    let mut blob = cursor.section()?;
    let gene = blob.str()?;
    let term_id = GoTermId::from(blob.u32()?);
    let evidence = blob.str()?;
    let mut annotation = Annotation::new(gene, term_id, evidence)?;
    match blob.u8()? {
        0 => (),
        1 => annotation = annotation.with_db_id(blob.str()?),
        _ => return Err(GoError::ParseBinaryError),
    }
    annotation = annotation
        .with_db_ref(blob.strings()?)
        .with_with_from(blob.strings()?);

    if blob.is_empty() {
        Ok(annotation)
    } else {
        Err(GoError::ParseBinaryError)
    }
}

impl AnnotationIndex {
    /// Returns a binary representation of the index
    ///
    /// - Flags (1 byte: case-insensitive gene matching)
    /// - Gene universe (number of genes, followed by each symbol)
    /// - Annotations as one section (see `Annotation::as_bytes`)
    pub(crate) fn as_bytes(&self) -> Vec<u8> {
        let mut res = vec![u8::from(self.ignore_case())];
        push_strings(&mut res, self.universe().iter().map(String::as_str));
        let mut buffer = Vec::new();
        for annotation in self.annotations() {
            buffer.append(&mut annotation.as_bytes());
        }
        push_section(&mut res, &buffer);
        res
    }

    /// Rebuilds the index for `ontology` from bytes
    ///
    /// # Errors
    ///
    /// [`GoError::ParseBinaryError`] if the data is malformed or an
    /// annotation refers to a term or gene that is not known
    pub(crate) fn from_cursor(cursor: &mut Cursor, ontology: &Ontology) -> GoResult<Self> {
        let ignore_case = match cursor.u8()? {
            0 => false,
            1 => true,
            _ => return Err(GoError::ParseBinaryError),
        };
        let universe = GeneUniverse::new(cursor.strings()?);
        let mut index = AnnotationIndex::new(ontology, universe, ignore_case);

        let mut annotations = cursor.section()?;
        while !annotations.is_empty() {
            let annotation = annotation_from_cursor(&mut annotations)?;
            if !ontology.contains(annotation.term_id())
                || !index.universe().contains(annotation.gene())
            {
                return Err(GoError::ParseBinaryError);
            }
            index.push(annotation);
        }
        Ok(index)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn annotation_bytes() {
        let annotation = Annotation::new("TP53", GoTermId::from(6915u32), "IDA")
            .unwrap()
            .with_db_ref(["PMID:1", "PMID:2"]);
        let bytes = annotation.as_bytes();
        assert_eq!(bytes[4..8], [0, 0, 0, 4]);
        assert_eq!(&bytes[8..12], b"TP53");
        assert_eq!(bytes[12..16], 6915u32.to_be_bytes());

        let mut cursor = Cursor::new(&bytes);
        assert_eq!(annotation_from_cursor(&mut cursor).unwrap(), annotation);
        assert!(cursor.is_empty());
    }

    #[test]
    fn db_id_flag() {
        let annotation = Annotation::new("TP53", GoTermId::from(1u32), "IEA")
            .unwrap()
            .with_db_id("P04637")
            .with_with_from(["InterPro:IPR002117"]);
        let bytes = annotation.as_bytes();
        let decoded = annotation_from_cursor(&mut Cursor::new(&bytes)).unwrap();
        assert_eq!(decoded.db_id(), Some("P04637"));
        assert_eq!(decoded, annotation);
    }
}
