/*!
Readers and writers for the files a simulation run consumes and produces.

The reference stream is a text file holding one decimal virtual address per line,
the result is written as `virtual,physical,value` CSV lines.
*/

pub mod stream;
#[doc(hidden)]
pub use stream::ReferenceStream;

pub mod writer;
#[doc(hidden)]
pub use writer::RecordWriter;
