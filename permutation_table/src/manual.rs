/*!

This is the long-form manual for `permutation_table` and `surveyrand`.

## What is generated

Randomizing the order in which a respondent sees N texts is done in two parts:

* a lookup table with every possible ordering of the texts, attached to the form as
  a CSV file
* a few rows of the form that draw a random row of that table when the survey starts,
  and then display the texts in the order of that row.

`surveyrand` writes both. The rows of the form are written in an Excel file that
follows the XLSForm layout used by SurveyCTO, to be copied into the questionnaire.

### The permutation table

With 3 texts, the file `randomization.csv` looks as follows:

```text
permutation,v0,v1,v2
1,0,1,2
2,0,2,1
3,1,0,2
4,1,2,0
5,2,0,1
6,2,1,0
```

The rows are all the permutations of `0..N`, in lexicographic order. The first column is
the index of the row, starting at 1. The remaining columns are named after the position
in the ordering. Running the program twice with the same number of texts produces the
same file, byte for byte.

There are `N!` rows, which grows very quickly: 10 texts is already more than 3.6 million rows.
The number of texts is limited to 10 by default. The limit can be changed with `--max-texts`
up to 12: 12 texts is already a CSV file of about 17GB.

### The `survey` sheet

| type             | name                  | label                            | relevance | calculation |
|------------------|-----------------------|----------------------------------|-----------|-------------|
| select_one texts | texts                 | Field used to load the reference | no        |             |
| calculate        | permutations_max      | Maximum number of permutations   |           | N!          |
| calculate        | permutation_number    | Random number generator          |           | `once(random())` |
| calculate        | permutation_selection | Selection of permutation         |           | `if(...)`   |
| calculate        | text_1_code           | Text 1: code                     |           | `pulldata("randomization", "v1", "permutation", ${permutation_selection})` |
| calculate_here   | text_1_label          | Text 1: label                    |           | `jr:choice-name(${text_1_code}, "${texts}")` |
| ...              |                       |                                  |           |             |
| begin_group      | randomization_group   | Randomization module             |           |             |
| note             | randomization_note    | Note of randomization module     |           |             |
| *field type*     | text_1                | `1. ${text_1_label}`             |           |             |
| ...              |                       |                                  |           |             |
| end_group        | randomization_group   | Randomization module             |           |             |

The first argument of `pulldata` is the name of the CSV file without its extension. The
CSV file must be attached to the form under that name.

**Numbering of the positions.** The table and the form do not count from the same place:

* the columns of the table are `v0` to `v(N-1)` and hold the positions `0` to `N-1`
* `pulldata` reads the columns `v1` to `vN`, and the codes of the `choices` sheet are `1` to `N`.

As generated, `text_N_code` reads a column that does not exist, and the codes it gets are
one below the codes of the `choices` sheet. Before using the files in a form, either
renumber the table (columns `v1` to `vN`, values `1` to `N`) or edit the `pulldata` and
`jr:choice-name` calls to match the table.

The *field type* is the type of the questions that display the texts, for example
`integer` or `select_one yesno`. For `select_one` and `select_multiple`, the name of the
list must be part of the field type.

### The `choices` sheet

| list_name | value | label      |
|-----------|-------|------------|
| texts     | 1     | first text |
| texts     | 2     | ...        |

## Configuration

All the inputs can be provided in a JSON file with the `--config` flag, for example:

```json
{
  "outputDirectory": "output",
  "csvName": "randomization.csv",
  "xlsxName": "randomization.xlsx",
  "fieldType": "integer",
  "texts": ["Apples", "Oranges", "Pears"],
  "maxTexts": 10
}
```

All the fields are optional. A relative output directory is relative to the location of the
configuration file. Flags passed on the command line take precedence over the file.
Whatever is missing is asked for interactively.

The labels of a template generated previously can be reused with `--labels-from`: the labels
are read from its `choices` sheet.

 */
