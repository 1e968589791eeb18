//! Parses the `go-basic.obo` / `go.obo` file
//!
//! Only `[Term]` stanzas are considered, all other stanzas
//! (e.g. `[Typedef]`) and the header are skipped.
use std::io::BufRead;

use tracing::{debug, info, trace};

use crate::ontology::builder::{Builder, LooseCollection};
use crate::term::internal::GoTermInternal;
use crate::{Domain, GoError, GoResult, GoTermId, OboOptions, Ontology};

/// The fields of one `[Term]` stanza
#[derive(Debug, Default)]
struct Stanza {
    /// 1-based line number of the `[Term]` marker
    line: usize,
    id: Option<GoTermId>,
    name: Option<String>,
    domain: Option<Domain>,
    definition: Option<String>,
    alt_ids: Vec<GoTermId>,
    synonyms: Vec<String>,
    is_a: Vec<GoTermId>,
    part_of: Vec<GoTermId>,
}

impl Stanza {
    fn new(line: usize) -> Self {
        Self {
            line,
            ..Default::default()
        }
    }

    fn parse_line(&mut self, line: &str) -> GoResult<()> {
        let Some((tag, value)) = line.split_once(':') else {
            trace!("Ignoring line without tag: {}", line);
            return Ok(());
        };
        let value = value.trim();
        match tag {
            "id" if self.id.is_none() => self.id = Some(GoTermId::try_from(value)?),
            "name" if self.name.is_none() => self.name = Some(value.to_string()),
            "namespace" if self.domain.is_none() => self.domain = Some(value.parse()?),
            "def" if self.definition.is_none() => {
                self.definition = quoted_text(value).map(|(text, _)| text);
            }
            "alt_id" => self.alt_ids.push(first_id(value)?),
            "synonym" => {
                if let Some((text, rest)) = quoted_text(value) {
                    if rest.split_whitespace().next() == Some("EXACT") {
                        self.synonyms.push(text);
                    }
                }
            }
            "is_a" => self.is_a.push(first_id(value)?),
            "relationship" => {
                let mut tokens = value.split_whitespace();
                if tokens.next() == Some("part_of") {
                    let target = tokens.next().ok_or_else(|| {
                        GoError::InvalidInput(format!("part_of without target: {line}"))
                    })?;
                    self.part_of.push(GoTermId::try_from(target)?);
                }
            }
            _ => (),
        }
        Ok(())
    }

    /// Adds the term, its names and IDs to the builder
    fn finish(self, builder: &mut Builder<LooseCollection>, options: &OboOptions) -> GoResult<()> {
        let (Some(id), Some(name), Some(domain)) = (self.id, self.name, self.domain) else {
            return Err(GoError::InvalidInput(format!(
                "[Term] stanza in line {} requires id, name and namespace",
                self.line
            )));
        };

        let mut term = GoTermInternal::new(id, name, domain);
        *term.definition_mut() = self.definition;
        for parent in self.is_a {
            term.add_parent(parent);
        }
        if !options.part_of_cc_only || domain == Domain::CellularComponent {
            for whole in self.part_of {
                term.add_whole(whole);
            }
        }
        builder.insert_term(term);

        for alt in self.alt_ids {
            builder.add_alt_id(alt, id);
        }
        for synonym in &self.synonyms {
            builder.add_synonym(synonym, id);
        }
        Ok(())
    }
}

/// Returns the first whitespace separated token as [`GoTermId`]
///
/// e.g.: `GO:0008150 ! biological_process`
fn first_id(value: &str) -> GoResult<GoTermId> {
    GoTermId::try_from(value.split_whitespace().next().unwrap_or_default())
}

/// Extracts the text between the leading double quotes
///
/// Escaped characters (`\"`) are unescaped. Returns the text and the
/// remainder after the closing quote, or `None` if `value` does not
/// start with a quoted string.
fn quoted_text(value: &str) -> Option<(String, &str)> {
    let inner = value.strip_prefix('"')?;
    let mut text = String::with_capacity(inner.len());
    let mut escaped = false;
    for (idx, c) in inner.char_indices() {
        match c {
            _ if escaped => {
                text.push(c);
                escaped = false;
            }
            '\\' => escaped = true,
            '"' => return Some((text, &inner[idx + 1..])),
            _ => text.push(c),
        }
    }
    None
}

/// Builds an [`Ontology`] from OBO data
///
/// A stanza ends at the first blank line, at the next stanza
/// header or at the end of the input.
pub(crate) fn read_obo<R: BufRead>(reader: R, options: &OboOptions) -> GoResult<Ontology> {
    let mut builder = Builder::new();
    let mut stanza: Option<Stanza> = None;
    let mut n_terms = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line
            .map_err(|err| GoError::InvalidInput(format!("unable to read OBO data: {err}")))?;
        let line = line.trim_end();

        if line.is_empty() || line.starts_with('[') {
            if let Some(finished) = stanza.take() {
                finished.finish(&mut builder, options)?;
                n_terms += 1;
            }
            if line == "[Term]" {
                stanza = Some(Stanza::new(idx + 1));
            } else if !line.is_empty() {
                trace!("Skipping stanza {}", line);
            }
            continue;
        }

        if let Some(current) = stanza.as_mut() {
            current.parse_line(line)?;
        }
    }
    if let Some(finished) = stanza.take() {
        finished.finish(&mut builder, options)?;
        n_terms += 1;
    }
    info!("Parsed {} GO term definitions", n_terms);

    info!("Adding child and part relationships");
    let connected = builder.terms_complete().connect_all_terms()?;

    if options.flatten {
        info!("Flattening ancestors and descendants");
        let ontology = connected
            .flatten(options.closure_includes_part_of)?
            .build();
        debug!("Flattened {} terms", ontology.len());
        Ok(ontology)
    } else {
        Ok(connected
            .closure_includes_part_of(options.closure_includes_part_of)
            .build())
    }
}
