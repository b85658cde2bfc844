use std::fmt;
use std::str::FromStr;
use clap::ValueEnum;
use crate::error::TexError;

/// 原始碼的格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Tex,
    Latex,
}

/// 輸出檔案的格式
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Dvi,
    Pdf,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Tex => "tex",
            InputFormat::Latex => "latex",
        }
    }
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Dvi => "dvi",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// 輸出檔案的副檔名（含點）
    pub fn suffix(&self) -> &'static str {
        match self {
            OutputFormat::Dvi => ".dvi",
            OutputFormat::Pdf => ".pdf",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = TexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tex" => Ok(InputFormat::Tex),
            "latex" => Ok(InputFormat::Latex),
            _ => Err(TexError::invalid_argument(format!("不支援的輸入格式：{}", s))),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dvi" => Ok(OutputFormat::Dvi),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(TexError::invalid_argument(format!("不支援的輸出格式：{}", s))),
        }
    }
}

/// 依 (輸入格式, 輸出格式) 決定的引擎指令與輸出副檔名
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineSelection {
    pub input: InputFormat,
    pub output: OutputFormat,
    pub command: &'static str,
    pub suffix: &'static str,
}

impl EngineSelection {
    pub fn new(input: InputFormat, output: OutputFormat) -> Self {
        let command = match (input, output) {
            (InputFormat::Tex, OutputFormat::Dvi) => "tex",
            (InputFormat::Latex, OutputFormat::Dvi) => "latex",
            (InputFormat::Tex, OutputFormat::Pdf) => "pdftex",
            (InputFormat::Latex, OutputFormat::Pdf) => "pdflatex",
        };
        EngineSelection {
            input,
            output,
            command,
            suffix: output.suffix(),
        }
    }

    /// 由格式名稱解析，任一名稱不在表中即視為無法處理的轉換
    pub fn resolve(input_format: &str, output_format: &str) -> Result<Self, TexError> {
        let unsupported = || {
            TexError::invalid_argument(format!(
                "無法處理的轉換：{} -> {}",
                input_format, output_format
            ))
        };
        let input = input_format.parse::<InputFormat>().map_err(|_| unsupported())?;
        let output = output_format.parse::<OutputFormat>().map_err(|_| unsupported())?;
        Ok(EngineSelection::new(input, output))
    }

    /// 引擎產生的輸出檔名，例如 texput.pdf
    pub fn output_file(&self) -> String {
        format!("{}{}", crate::service::work_dir::JOB_NAME, self.suffix)
    }
}

/// 單次引擎執行的結果
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// 成功結束，附帶該次執行後 texput.aux 的內容
    Succeeded { aux: Vec<u8> },
    /// 以非零狀態結束（被訊號終止時沒有結束碼）
    Failed { code: Option<i32> },
}
