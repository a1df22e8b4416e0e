//! Usage, version and license text

use std::io::{self, Write};

use crate::{CLIENT_NAME, CLIENT_VERSION};

const TOOL_USAGE: &str = "\
Wise2DBA
========

The Wise2 DNA Block Aligner (DBA) aligns two DNA sequences using the
assumption that the sequences share a number of colinear blocks of
conservation separated by potentially large and varied lengths of DNA in the
two sequences.

[Required]

      --asequence    : file : first DNA sequence to align
      --bsequence    : file : second DNA sequence to align

[Optional]

      --para         :      : Enable display of parameters in output.
      --nopara       :      : Disable display of parameters in output.
      --pretty       :      : Enable pretty ASCII alignment.
      --nopretty     :      : Disable pretty ASCII alignment.
";

const GENERIC_USAGE: &str = "\
[General]

  -h, --help        :      : prints this help text
      --async       :      : forces to make an asynchronous query
      --email       : str  : e-mail address
      --title       : str  : title for job
      --status      :      : get job status
      --resultTypes :      : get available result types for job
      --polljob     :      : fetch the results of a finished job
      --jobid       : str  : jobid that was returned when an asynchronous job
                             was submitted.
      --outfile     : str  : file name for results (default is jobid;
                             \"-\" for STDOUT)
      --outformat   : str  : result format to retrieve
      --params      :      : list input parameters
      --paramDetail : str  : display details for input parameter
      --quiet       :      : decrease output
      --verbose     :      : increase output
      --version     :      : prints out the version of the client
      --debugLevel  : int  : debug level (0-3)
      --endpoint    : str  : service endpoint URL

Every option can also be written as /option (e.g. /jobid).
Sequence arguments accept a file name, \"-\" for STDIN, or raw sequence data.

Synchronous job:

  The job is submitted and its status checked once. Results of a job that
  has already finished are saved; otherwise fetch them later with --polljob.
  Use: wise2dba --email <your@email> [options...] --asequence <file> --bsequence <file>

Asynchronous job:

  Use: wise2dba --async --email <your@email> [options...] --asequence <file> --bsequence <file>
  Returns: jobid

  Check status of Asynchronous job:
  Use: wise2dba --status --jobid <jobId>

  Retrieve job data:
  Use: wise2dba --polljob --jobid <jobId> [--outfile string]
  Returns: results saved to file(s)
";

const LICENSE: &str = "\
Licensed under the Apache License, Version 2.0 (the \"License\");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an \"AS IS\" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
";

/// Full usage: tool section followed by the generic options.
pub fn usage_text() -> String {
    format!("{TOOL_USAGE}\n{GENERIC_USAGE}")
}

pub fn print_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", usage_text())
}

pub fn version_text() -> String {
    format!("{CLIENT_NAME} {CLIENT_VERSION}")
}

pub fn license_text() -> &'static str {
    LICENSE
}

pub fn print_version(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", version_text())?;
    writeln!(out)?;
    write!(out, "{}", license_text())
}
