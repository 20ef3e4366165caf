// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! XMP sidecar rendering. The layout matches what `ExifTool` itself writes, so
//! the output reads back cleanly with any XMP-aware tool.

use std::fmt::Write;

use crate::decision::Payload;

const HEADER: &str = "<?xpacket begin='\u{feff}' id='W5M0MpCehiHzreSzNTczkc9d'?>
<x:xmpmeta xmlns:x='adobe:ns:meta/' x:xmptk='Image::ExifTool 12.99'>
<rdf:RDF xmlns:rdf='http://www.w3.org/1999/02/22-rdf-syntax-ns#'>

";

const FOOTER: &str = "</rdf:RDF>
</x:xmpmeta>
<?xpacket end='w'?>";

/// Renders the sidecar for `payload`. The date & time is written to both
/// `exif:DateTimeOriginal` and `photoshop:DateCreated`.
pub fn render(payload: &Payload) -> String {
  let mut xmp = String::from(HEADER);

  if let Some(time) = payload.timestamp {
    let time = time.to_string();
    description(&mut xmp, "exif", "http://ns.adobe.com/exif/1.0/", "DateTimeOriginal", &time);
    description(
      &mut xmp,
      "photoshop",
      "http://ns.adobe.com/photoshop/1.0/",
      "DateCreated",
      &time,
    );
  }

  if let Some(id) = &payload.content_id {
    description(
      &mut xmp,
      "Apple",
      "http://ns.exiftool.org/MakerNotes/Apple/1.0/",
      "ContentIdentifier",
      id,
    );
  }

  xmp.push_str(FOOTER);
  xmp
}

fn description(xmp: &mut String, prefix: &str, namespace: &str, tag: &str, value: &str) {
  // Writing to a `String` cannot fail.
  let _ = write!(
    xmp,
    "<rdf:Description rdf:about=''\n xmlns:{prefix}='{namespace}'>\n <{prefix}:{tag}>{}</{prefix}:{tag}>\n</rdf:Description>\n\n",
    escape(value)
  );
}

fn escape(value: &str) -> String {
  let mut escaped = String::with_capacity(value.len());
  for c in value.chars() {
    match c {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '\'' => escaped.push_str("&apos;"),
      '"' => escaped.push_str("&quot;"),
      c => escaped.push(c),
    }
  }
  escaped
}
